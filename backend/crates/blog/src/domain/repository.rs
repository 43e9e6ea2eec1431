//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{BlogId, CommentId, PostId, UserId};
use platform::password::HashedPassword;

use crate::domain::entity::{Account, Comment, CommentThread, Author, Post, PostDetail, PostSummary, Tag};
use crate::domain::search::PostSearchQuery;
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Run the composed search query. Returns the page of rows plus the
    /// total element count from the companion count query.
    async fn search(&self, query: &PostSearchQuery) -> BlogResult<(Vec<PostSummary>, i64)>;

    /// Find a post without joins
    async fn find_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>>;

    /// User that owns the post's blog
    async fn find_owner(&self, post_id: PostId) -> BlogResult<Option<UserId>>;

    /// Atomically bump the view counter and load the full detail view
    async fn read_detail(&self, post_id: PostId) -> BlogResult<Option<PostDetail>>;

    /// Insert a new post under a blog
    async fn create(&self, blog_id: BlogId, title: &str, content: &str) -> BlogResult<Post>;

    /// Update title and content, bumping `updated_at`
    async fn update(&self, post_id: PostId, title: &str, content: &str) -> BlogResult<Post>;

    /// Delete a post and its comments, likes and tag mappings in one
    /// transaction
    async fn delete_cascade(&self, post_id: PostId) -> BlogResult<()>;

    /// Post author, via blog -> user
    async fn find_author(&self, post_id: PostId) -> BlogResult<Option<Author>>;

    /// Blog owned by the user, for resolving where a new post goes
    async fn find_blog_by_user(&self, user_id: UserId) -> BlogResult<Option<BlogId>>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Exact-title lookup
    async fn find_by_title(&self, title: &str) -> BlogResult<Option<Tag>>;

    /// Tag titles mapped to a post, insertion order
    async fn tags_for_post(&self, post_id: PostId) -> BlogResult<Vec<String>>;

    /// Drop all mappings for the post, then find-or-create each title and
    /// map it. Returns the titles as saved.
    async fn replace_post_tags(&self, post_id: PostId, titles: &[String]) -> BlogResult<Vec<String>>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Insert a comment (or reply, when parent is set)
    async fn create(
        &self,
        post_id: PostId,
        author_id: UserId,
        parent_comment_id: Option<CommentId>,
        content: &str,
    ) -> BlogResult<Comment>;

    async fn find_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>>;

    /// Top-level comments with one level of replies, oldest first
    async fn threads_for_post(&self, post_id: PostId) -> BlogResult<Vec<CommentThread>>;
}

/// Like repository trait
#[trait_variant::make(LikeRepository: Send)]
pub trait LocalLikeRepository {
    /// Insert the like and bump the post counter atomically. Returns the
    /// new count. `DuplicateLike` when the row already exists.
    async fn add(&self, user_id: UserId, post_id: PostId) -> BlogResult<i64>;

    /// Delete the like and decrement the counter (floor 0). Returns the
    /// new count. `LikeNotFound` when no row existed.
    async fn remove(&self, user_id: UserId, post_id: PostId) -> BlogResult<i64>;

    async fn count(&self, post_id: PostId) -> BlogResult<i64>;

    async fn exists(&self, user_id: UserId, post_id: PostId) -> BlogResult<bool>;
}

/// Follow repository trait
#[trait_variant::make(FollowRepository: Send)]
pub trait LocalFollowRepository {
    /// `DuplicateFollow` when the edge already exists
    async fn create(&self, follower_id: UserId, following_id: UserId) -> BlogResult<()>;

    /// `FollowNotFound` when the edge does not exist
    async fn delete(&self, follower_id: UserId, following_id: UserId) -> BlogResult<()>;

    /// Users following `user_id`, newest edge first
    async fn followers(&self, user_id: UserId, page: u32, size: u32)
    -> BlogResult<(Vec<Author>, i64)>;

    /// Users `user_id` follows, newest edge first
    async fn followings(&self, user_id: UserId, page: u32, size: u32)
    -> BlogResult<(Vec<Author>, i64)>;
}

/// Everything the HTTP layer needs from one backing store
pub trait BlogRepository:
    PostRepository
    + TagRepository
    + CommentRepository
    + LikeRepository
    + FollowRepository
    + AccountRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> BlogRepository for T where
    T: PostRepository
        + TagRepository
        + CommentRepository
        + LikeRepository
        + FollowRepository
        + AccountRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    async fn find_by_id(&self, user_id: UserId) -> BlogResult<Option<Account>>;

    /// Partial profile update; untouched fields stay as they are
    async fn update_profile(
        &self,
        user_id: UserId,
        nickname: Option<&str>,
        password_hash: Option<&HashedPassword>,
    ) -> BlogResult<Account>;

    /// Remove everything the account owns, the account itself and its
    /// live sessions, in one transaction
    async fn delete_cascade(&self, account: &Account) -> BlogResult<()>;
}
