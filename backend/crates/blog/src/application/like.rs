//! Like Use Cases
//!
//! Uniqueness lives at the datastore; a racing duplicate insert comes
//! back as `DuplicateLike`.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::repository::{LikeRepository, PostRepository};
use crate::error::{BlogError, BlogResult};

/// Like count plus whether the caller has liked the post
#[derive(Debug, Clone, Copy)]
pub struct LikeInfo {
    pub like_count: i64,
    pub liked: bool,
}

/// Like use case
pub struct LikeUseCase<R>
where
    R: LikeRepository + PostRepository,
{
    repo: Arc<R>,
}

impl<R> LikeUseCase<R>
where
    R: LikeRepository + PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public read. Anonymous callers get the count with `liked = false`.
    pub async fn info(&self, post_id: PostId, user_id: Option<UserId>) -> BlogResult<LikeInfo> {
        self.check_post_exists(post_id).await?;

        let like_count = self.repo.count(post_id).await?;
        let liked = match user_id {
            Some(user_id) => self.repo.exists(user_id, post_id).await?,
            None => false,
        };

        Ok(LikeInfo { like_count, liked })
    }

    pub async fn add(&self, post_id: PostId, user_id: UserId) -> BlogResult<LikeInfo> {
        self.check_post_exists(post_id).await?;

        let like_count = self.repo.add(user_id, post_id).await?;

        Ok(LikeInfo {
            like_count,
            liked: true,
        })
    }

    pub async fn remove(&self, post_id: PostId, user_id: UserId) -> BlogResult<LikeInfo> {
        self.check_post_exists(post_id).await?;

        let like_count = self.repo.remove(user_id, post_id).await?;

        Ok(LikeInfo {
            like_count,
            liked: false,
        })
    }

    async fn check_post_exists(&self, post_id: PostId) -> BlogResult<()> {
        PostRepository::find_by_id(&*self.repo, post_id)
            .await?
            .ok_or(BlogError::PostNotFound(post_id.as_i64()))?;
        Ok(())
    }
}
