//! Sign Up Use Case
//!
//! Creates a new user account. The user's blog is created alongside it
//! in the same transaction.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Nickname};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate fields
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
        let nickname =
            Nickname::new(&input.nickname).map_err(|e| AuthError::Validation(e.to_string()))?;

        // Check uniqueness before insert for a friendly error; the
        // database constraints remain the source of truth.
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.user_repo.exists_by_nickname(&nickname).await? {
            return Err(AuthError::NicknameTaken);
        }

        // Validate and hash password
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let new_user = NewUser {
            email,
            nickname,
            password_hash,
        };

        let user = self.user_repo.create_with_blog(&new_user).await?;

        tracing::info!(
            user_id = %user.user_id,
            nickname = %user.nickname,
            "User signed up"
        );

        Ok(SignUpOutput { user })
    }
}
