//! Tag Use Cases

use std::sync::Arc;

use crate::domain::entity::Tag;
use crate::domain::repository::TagRepository;
use crate::error::{BlogError, BlogResult};

/// Tag use case
pub struct TagUseCase<R>
where
    R: TagRepository,
{
    repo: Arc<R>,
}

impl<R> TagUseCase<R>
where
    R: TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Exact-title lookup
    pub async fn get(&self, title: &str) -> BlogResult<Tag> {
        self.repo
            .find_by_title(title)
            .await?
            .ok_or_else(|| BlogError::TagNotFound(title.to_string()))
    }
}
