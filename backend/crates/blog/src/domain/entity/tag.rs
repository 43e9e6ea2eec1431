//! Tag Entity

use kernel::id::TagId;

/// A tag, shared across posts and unique by title
#[derive(Debug, Clone)]
pub struct Tag {
    pub tag_id: TagId,
    pub title: String,
}
