//! Account Entity
//!
//! The blog crate's view of a user account. Carries the password hash so
//! profile updates and account deletion can verify the caller.

use kernel::id::{BlogId, UserId};
use platform::password::HashedPassword;

#[derive(Debug, Clone)]
pub struct Account {
    pub user_id: UserId,
    pub email: String,
    pub nickname: String,
    pub password_hash: HashedPassword,
    pub blog_id: BlogId,
    pub blog_title: String,
}
