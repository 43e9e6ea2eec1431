//! User Entity
//!
//! A user account together with its automatically-created blog.
//! Identifiers are database-assigned; a `User` only exists once the
//! row has been inserted.

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, UserId};
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, Nickname};

/// Persisted user account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Login identifier (unique)
    pub email: Email,
    /// Public display name (unique)
    pub nickname: Nickname,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    /// The user's blog, created at signup
    pub blog_id: BlogId,
    pub blog_title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a user row that has not been inserted yet
#[derive(Debug)]
pub struct NewUser {
    pub email: Email,
    pub nickname: Nickname,
    pub password_hash: HashedPassword,
}

impl NewUser {
    /// Default blog title assigned at signup
    pub fn default_blog_title(&self) -> String {
        format!("{}'s blog", self.nickname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_default_blog_title() {
        let password = ClearTextPassword::new("password123".to_string()).unwrap();
        let new_user = NewUser {
            email: Email::new("a@x.com").unwrap(),
            nickname: Nickname::new("alice").unwrap(),
            password_hash: password.hash(None).unwrap(),
        };
        assert_eq!(new_user.default_blog_title(), "alice's blog");
    }
}
