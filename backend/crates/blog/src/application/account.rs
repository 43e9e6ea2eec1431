//! Account Lifecycle Use Cases
//!
//! Profile reads and identity-matched mutation: partial profile update,
//! and full account deletion with every owned row removed in one
//! transaction.

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::value_object::Nickname;
use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{BlogError, BlogResult};

/// Optional fields; absent fields stay unchanged
pub struct ProfileUpdateInput {
    pub nickname: Option<String>,
    pub password: Option<String>,
}

/// Account use case
pub struct AccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Public profile read
    pub async fn get_profile(&self, user_id: UserId) -> BlogResult<Account> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(BlogError::UserNotFound(user_id.as_i64()))
    }

    /// Identity-matched partial update. Password goes through the same
    /// hasher as signup.
    pub async fn update_profile(
        &self,
        target_user_id: UserId,
        requester_id: UserId,
        input: ProfileUpdateInput,
    ) -> BlogResult<Account> {
        self.get_profile(target_user_id).await?;

        if requester_id != target_user_id {
            return Err(BlogError::Forbidden);
        }

        let nickname = match input.nickname.as_deref() {
            Some(n) => Some(
                Nickname::new(n)
                    .map_err(|e| BlogError::Validation(e.to_string()))?,
            ),
            None => None,
        };

        let password_hash = match input.password {
            Some(p) => {
                let password = ClearTextPassword::new(p)?;
                Some(password.hash(self.config.pepper())?)
            }
            None => None,
        };

        let account = self
            .repo
            .update_profile(
                target_user_id,
                nickname.as_ref().map(|n| n.as_str()),
                password_hash.as_ref(),
            )
            .await?;

        tracing::info!(user_id = %target_user_id, "Profile updated");

        Ok(account)
    }

    /// Identity-matched deletion. The checks run in a fixed order:
    /// target existence, then ownership, then password confirmation.
    pub async fn delete_account(
        &self,
        target_user_id: UserId,
        requester_id: UserId,
        password_confirmation: String,
    ) -> BlogResult<()> {
        let account = self.get_profile(target_user_id).await?;

        if requester_id != target_user_id {
            return Err(BlogError::Forbidden);
        }

        let password = ClearTextPassword::new(password_confirmation)
            .map_err(|_| BlogError::InvalidCredentials)?;
        if !account.password_hash.verify(&password, self.config.pepper()) {
            return Err(BlogError::InvalidCredentials);
        }

        self.repo.delete_cascade(&account).await?;

        Ok(())
    }
}
