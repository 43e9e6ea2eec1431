//! Application Layer
//!
//! Use cases orchestrating the repositories.

pub mod account;
pub mod comment;
pub mod follow;
pub mod like;
pub mod post;
pub mod tag;

pub use account::{AccountUseCase, ProfileUpdateInput};
pub use comment::CommentUseCase;
pub use follow::FollowUseCase;
pub use like::{LikeInfo, LikeUseCase};
pub use post::{PostUseCase, PostWriteInput, PostWriteOutput};
pub use tag::TagUseCase;
