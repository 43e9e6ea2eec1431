//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::LikeInfo;
use crate::domain::entity::{Account, Author, Comment, CommentThread, PostDetail, PostSummary, Tag};
use crate::domain::search::{
    DEFAULT_PAGE_SIZE, PostSearchQuery, SearchField, SortField, SortOrder, TagMode, sanitize_tags,
};

// ============================================================================
// Post Listing
// ============================================================================

/// Query string of GET /posts. Repeated `tag=` parameters collect into
/// the vector; unknown enum values fail deserialization (400).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostListParams {
    pub page: u32,
    pub size: u32,
    pub blog_id: Option<i64>,
    pub keyword: Option<String>,
    pub search: SearchField,
    #[serde(rename = "tag")]
    pub tag: Vec<String>,
    pub tag_mode: TagMode,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for PostListParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            blog_id: None,
            keyword: None,
            search: SearchField::default(),
            tag: Vec::new(),
            tag_mode: TagMode::default(),
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl PostListParams {
    pub fn into_query(self) -> PostSearchQuery {
        PostSearchQuery {
            page: self.page,
            size: self.size,
            blog_id: self.blog_id,
            keyword: self.keyword,
            search: self.search,
            tags: sanitize_tags(&self.tag),
            tag_mode: self.tag_mode,
            sort: self.sort,
            order: self.order,
        }
    }
}

/// Page/size pair for the follower listings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Create and update share the same shape; tags replace the whole set
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWriteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub user_id: i64,
    pub nickname: String,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            user_id: author.user_id.as_i64(),
            nickname: author.nickname.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListItemResponse {
    pub post_id: i64,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<PostSummary> for PostListItemResponse {
    fn from(summary: PostSummary) -> Self {
        Self {
            post_id: summary.post_id.as_i64(),
            title: summary.title,
            content: summary.content,
            author: AuthorResponse::from(&summary.author),
            view_count: summary.view_count,
            like_count: summary.like_count,
            created_at: summary.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: i64,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
    pub tags: Vec<String>,
    pub comments: Vec<CommentThreadResponse>,
    pub view_count: i64,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn from_detail(detail: PostDetail) -> Self {
        Self {
            post_id: detail.post.post_id.as_i64(),
            title: detail.post.title,
            content: detail.post.content,
            author: AuthorResponse::from(&detail.author),
            tags: detail.tags,
            comments: detail
                .comments
                .into_iter()
                .map(CommentThreadResponse::from)
                .collect(),
            view_count: detail.post.view_count,
            like_count: detail.post.like_count,
            created_at: detail.post.created_at,
            updated_at: detail.post.updated_at,
        }
    }

    /// Write responses carry no comments
    pub fn from_write(output: crate::application::PostWriteOutput) -> Self {
        Self {
            post_id: output.post.post_id.as_i64(),
            title: output.post.title,
            content: output.post.content,
            author: AuthorResponse::from(&output.author),
            tags: output.tags,
            comments: Vec::new(),
            view_count: output.post.view_count,
            like_count: output.post.like_count,
            created_at: output.post.created_at,
            updated_at: output.post.updated_at,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyCreateRequest {
    pub comment_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: i64,
    pub content: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.comment_id.as_i64(),
            content: comment.content,
            author: AuthorResponse::from(&comment.author),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThreadResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub replies: Vec<CommentResponse>,
}

impl From<CommentThread> for CommentThreadResponse {
    fn from(thread: CommentThread) -> Self {
        Self {
            comment: CommentResponse::from(thread.comment),
            replies: thread
                .replies
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
        }
    }
}

// ============================================================================
// Likes
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub like_count: i64,
    pub liked: bool,
}

impl From<LikeInfo> for LikeResponse {
    fn from(info: LikeInfo) -> Self {
        Self {
            like_count: info.like_count,
            liked: info.liked,
        }
    }
}

// ============================================================================
// Follows
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub following_id: i64,
    pub following_nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowResponse {
    pub unfollowed_id: i64,
    pub unfollowed_nickname: String,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub nickname: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDeleteRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub blog_id: i64,
    pub blog_title: String,
}

impl From<&Account> for UserProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.user_id.as_i64(),
            email: account.email.clone(),
            nickname: account.nickname.clone(),
            blog_id: account.blog_id.as_i64(),
            blog_title: account.blog_title.clone(),
        }
    }
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub title: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self { title: tag.title }
    }
}
