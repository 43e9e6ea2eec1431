//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, search query model, repository traits
//! - `application/` - Use cases (posts, comments, likes, follows, tags,
//!   account lifecycle)
//! - `infra/` - PostgreSQL implementations and dynamic SQL composition
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Post CRUD with owner checks and tag auto-creation
//! - Listing through a composed search query: blog scope, keyword
//!   (title/blog/nickname), tag filters (AND/OR), sortable and paginated
//! - Comments with one level of replies
//! - Likes and follows with datastore-enforced uniqueness
//! - Account profile update and full cascading account deletion

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::router::blog_router;
