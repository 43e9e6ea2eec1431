//! Follow Use Cases

use std::sync::Arc;

use kernel::id::UserId;
use kernel::page::{PageInfo, PageResponse};

use crate::domain::entity::Author;
use crate::domain::repository::{AccountRepository, FollowRepository};
use crate::error::{BlogError, BlogResult};

/// Follow use case
pub struct FollowUseCase<R>
where
    R: FollowRepository + AccountRepository,
{
    repo: Arc<R>,
}

impl<R> FollowUseCase<R>
where
    R: FollowRepository + AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the followed user
    pub async fn follow(&self, follower_id: UserId, following_id: UserId) -> BlogResult<Author> {
        if follower_id == following_id {
            return Err(BlogError::SelfFollow);
        }

        let target = self.check_user_exists(following_id).await?;

        FollowRepository::create(&*self.repo, follower_id, following_id).await?;

        tracing::info!(
            follower_id = %follower_id,
            following_id = %following_id,
            "Follow created"
        );

        Ok(target)
    }

    /// Returns the unfollowed user
    pub async fn unfollow(&self, follower_id: UserId, following_id: UserId) -> BlogResult<Author> {
        let target = self.check_user_exists(following_id).await?;

        FollowRepository::delete(&*self.repo, follower_id, following_id).await?;

        Ok(target)
    }

    pub async fn followers(
        &self,
        user_id: UserId,
        page: u32,
        size: u32,
    ) -> BlogResult<PageResponse<Author>> {
        validate_page_size(size)?;
        self.check_user_exists(user_id).await?;

        let (content, total) = self.repo.followers(user_id, page, size).await?;

        Ok(PageResponse {
            content,
            page_info: PageInfo::new(page, size, total.max(0) as u64),
        })
    }

    pub async fn followings(
        &self,
        user_id: UserId,
        page: u32,
        size: u32,
    ) -> BlogResult<PageResponse<Author>> {
        validate_page_size(size)?;
        self.check_user_exists(user_id).await?;

        let (content, total) = self.repo.followings(user_id, page, size).await?;

        Ok(PageResponse {
            content,
            page_info: PageInfo::new(page, size, total.max(0) as u64),
        })
    }

    async fn check_user_exists(&self, user_id: UserId) -> BlogResult<Author> {
        let account = AccountRepository::find_by_id(&*self.repo, user_id)
            .await?
            .ok_or(BlogError::UserNotFound(user_id.as_i64()))?;

        Ok(Author {
            user_id: account.user_id,
            nickname: account.nickname,
        })
    }
}

fn validate_page_size(size: u32) -> BlogResult<()> {
    if size == 0 {
        return Err(BlogError::Validation("size must be greater than 0".into()));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::BlogId;
    use platform::password::ClearTextPassword;

    use crate::domain::entity::Account;
    use crate::domain::repository::{AccountRepository, FollowRepository};

    #[derive(Clone)]
    struct OneFollower;

    impl AccountRepository for OneFollower {
        async fn find_by_id(&self, user_id: UserId) -> BlogResult<Option<Account>> {
            let password_hash = ClearTextPassword::new("password123".to_string())
                .unwrap()
                .hash(None)
                .unwrap();

            Ok(Some(Account {
                user_id,
                email: "alice@example.com".to_string(),
                nickname: "alice".to_string(),
                password_hash,
                blog_id: BlogId::from_i64(1),
                blog_title: "alice's blog".to_string(),
            }))
        }

        async fn update_profile(
            &self,
            _user_id: UserId,
            _nickname: Option<&str>,
            _password_hash: Option<&platform::password::HashedPassword>,
        ) -> BlogResult<Account> {
            unreachable!()
        }

        async fn delete_cascade(&self, _account: &Account) -> BlogResult<()> {
            unreachable!()
        }
    }

    impl FollowRepository for OneFollower {
        async fn create(&self, _follower_id: UserId, _following_id: UserId) -> BlogResult<()> {
            Ok(())
        }

        async fn delete(&self, _follower_id: UserId, _following_id: UserId) -> BlogResult<()> {
            Ok(())
        }

        async fn followers(
            &self,
            _user_id: UserId,
            _page: u32,
            _size: u32,
        ) -> BlogResult<(Vec<Author>, i64)> {
            Ok((
                vec![Author {
                    user_id: UserId::from_i64(2),
                    nickname: "bob".to_string(),
                }],
                1,
            ))
        }

        async fn followings(
            &self,
            _user_id: UserId,
            _page: u32,
            _size: u32,
        ) -> BlogResult<(Vec<Author>, i64)> {
            Ok((Vec::new(), 0))
        }
    }

    #[tokio::test]
    async fn test_zero_page_size_is_a_validation_error() {
        let use_case = FollowUseCase::new(Arc::new(OneFollower));
        let user_id = UserId::from_i64(1);

        let err = use_case.followers(user_id, 0, 0).await.unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));

        let err = use_case.followings(user_id, 0, 0).await.unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_followers_page_info() {
        let use_case = FollowUseCase::new(Arc::new(OneFollower));

        let page = use_case
            .followers(UserId::from_i64(1), 0, 10)
            .await
            .unwrap();

        assert_eq!(page.content.len(), 1);
        assert_eq!(page.page_info.total_elements, 1);
        assert_eq!(page.page_info.total_pages, 1);
        assert!(page.page_info.first && page.page_info.last);
    }
}
