//! Comment Use Cases

use std::sync::Arc;

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entity::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Comment use case
pub struct CommentUseCase<R>
where
    R: CommentRepository + PostRepository,
{
    repo: Arc<R>,
}

impl<R> CommentUseCase<R>
where
    R: CommentRepository + PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Top-level comment on a post
    pub async fn comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        content: &str,
    ) -> BlogResult<Comment> {
        validate_content(content)?;
        self.check_post_exists(post_id).await?;

        let comment = CommentRepository::create(&*self.repo, post_id, author_id, None, content)
            .await?;

        tracing::info!(
            post_id = %post_id,
            comment_id = %comment.comment_id,
            "Comment created"
        );

        Ok(comment)
    }

    /// Reply under an existing top-level comment. Threads are one level
    /// deep, replying to a reply is rejected.
    pub async fn reply(
        &self,
        post_id: PostId,
        author_id: UserId,
        parent_comment_id: CommentId,
        content: &str,
    ) -> BlogResult<Comment> {
        validate_content(content)?;
        self.check_post_exists(post_id).await?;

        let parent = CommentRepository::find_by_id(&*self.repo, parent_comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound(parent_comment_id.as_i64()))?;

        if parent.post_id != post_id {
            return Err(BlogError::Validation(
                "parent comment belongs to a different post".into(),
            ));
        }
        if parent.parent_comment_id.is_some() {
            return Err(BlogError::Validation("cannot reply to a reply".into()));
        }

        let comment = CommentRepository::create(
            &*self.repo,
            post_id,
            author_id,
            Some(parent_comment_id),
            content,
        )
        .await?;

        Ok(comment)
    }

    async fn check_post_exists(&self, post_id: PostId) -> BlogResult<()> {
        PostRepository::find_by_id(&*self.repo, post_id)
            .await?
            .ok_or(BlogError::PostNotFound(post_id.as_i64()))?;
        Ok(())
    }
}

fn validate_content(content: &str) -> BlogResult<()> {
    if content.trim().is_empty() {
        return Err(BlogError::Validation("content must not be blank".into()));
    }
    Ok(())
}
