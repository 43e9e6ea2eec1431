//! Domain Entities

pub mod account;
pub mod comment;
pub mod post;
pub mod tag;

pub use account::Account;
pub use comment::{Comment, CommentThread};
pub use post::{Author, Post, PostDetail, PostSummary};
pub use tag::Tag;
