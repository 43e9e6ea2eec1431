//! Post Use Cases
//!
//! Listing via the search composer, detail reads with the view bump,
//! and owner-gated writes.

use std::sync::Arc;

use kernel::id::{PostId, UserId};
use kernel::page::{PageInfo, PageResponse};

use crate::domain::entity::{Author, Post, PostDetail, PostSummary};
use crate::domain::repository::{PostRepository, TagRepository};
use crate::domain::search::{PostSearchQuery, sanitize_tags};
use crate::error::{BlogError, BlogResult};

/// Title, content and the full replacement tag list
pub struct PostWriteInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

pub struct PostWriteOutput {
    pub post: Post,
    pub author: Author,
    pub tags: Vec<String>,
}

/// Post use case
pub struct PostUseCase<R>
where
    R: PostRepository + TagRepository,
{
    repo: Arc<R>,
}

impl<R> PostUseCase<R>
where
    R: PostRepository + TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Paginated listing through the composed search query
    pub async fn list(&self, query: &PostSearchQuery) -> BlogResult<PageResponse<PostSummary>> {
        if query.size == 0 {
            return Err(BlogError::Validation("size must be greater than 0".into()));
        }

        let (content, total) = self.repo.search(query).await?;

        Ok(PageResponse {
            content,
            page_info: PageInfo::new(query.page, query.size, total.max(0) as u64),
        })
    }

    /// Public detail view. Bumps the view counter.
    pub async fn detail(&self, post_id: PostId) -> BlogResult<PostDetail> {
        self.repo
            .read_detail(post_id)
            .await?
            .ok_or(BlogError::PostNotFound(post_id.as_i64()))
    }

    pub async fn create(&self, author_id: UserId, input: PostWriteInput) -> BlogResult<PostWriteOutput> {
        validate_write(&input)?;

        let blog_id = self
            .repo
            .find_blog_by_user(author_id)
            .await?
            .ok_or(BlogError::UserNotFound(author_id.as_i64()))?;

        let post = self.repo.create(blog_id, input.title.trim(), &input.content).await?;
        let tags = self
            .repo
            .replace_post_tags(post.post_id, &sanitize_tags(&input.tags))
            .await?;

        let author = self
            .repo
            .find_author(post.post_id)
            .await?
            .ok_or_else(|| BlogError::Internal("Author missing for new post".into()))?;

        tracing::info!(post_id = %post.post_id, author_id = %author_id, "Post created");

        Ok(PostWriteOutput { post, author, tags })
    }

    pub async fn update(
        &self,
        post_id: PostId,
        requester_id: UserId,
        input: PostWriteInput,
    ) -> BlogResult<PostWriteOutput> {
        validate_write(&input)?;
        self.check_owner(post_id, requester_id).await?;

        let post = self.repo.update(post_id, input.title.trim(), &input.content).await?;

        // Tag remap: every mapping is replaced wholesale
        let tags = self
            .repo
            .replace_post_tags(post_id, &sanitize_tags(&input.tags))
            .await?;

        let author = self
            .repo
            .find_author(post_id)
            .await?
            .ok_or_else(|| BlogError::Internal("Author missing for post".into()))?;

        Ok(PostWriteOutput { post, author, tags })
    }

    pub async fn delete(&self, post_id: PostId, requester_id: UserId) -> BlogResult<()> {
        self.check_owner(post_id, requester_id).await?;

        self.repo.delete_cascade(post_id).await?;

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }

    async fn check_owner(&self, post_id: PostId, requester_id: UserId) -> BlogResult<()> {
        let owner = self
            .repo
            .find_owner(post_id)
            .await?
            .ok_or(BlogError::PostNotFound(post_id.as_i64()))?;

        if owner != requester_id {
            return Err(BlogError::Forbidden);
        }

        Ok(())
    }
}

fn validate_write(input: &PostWriteInput) -> BlogResult<()> {
    if input.title.trim().is_empty() {
        return Err(BlogError::Validation("title must not be blank".into()));
    }
    if input.content.trim().is_empty() {
        return Err(BlogError::Validation("content must not be blank".into()));
    }
    Ok(())
}
