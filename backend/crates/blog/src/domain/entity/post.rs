//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, PostId, UserId};

/// A post as stored, without joined author data
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub blog_id: BlogId,
    pub title: String,
    pub content: String,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user behind a post or comment, via post -> blog -> user
#[derive(Debug, Clone)]
pub struct Author {
    pub user_id: UserId,
    pub nickname: String,
}

/// One row of a post listing, author joined in
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub post_id: PostId,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Full post view: author, tags, and the comment threads
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author: Author,
    pub tags: Vec<String>,
    pub comments: Vec<super::comment::CommentThread>,
}
