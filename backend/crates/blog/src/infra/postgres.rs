//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, CommentId, PostId, TagId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::{
    Account, Author, Comment, CommentThread, Post, PostDetail, PostSummary, Tag,
};
use crate::domain::repository::{
    AccountRepository, CommentRepository, FollowRepository, LikeRepository, PostRepository,
    TagRepository,
};
use crate::domain::search::PostSearchQuery;
use crate::error::{BlogError, BlogResult};
use crate::infra::search_sql::{build_count_query, build_search_query};

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn search(&self, query: &PostSearchQuery) -> BlogResult<(Vec<PostSummary>, i64)> {
        let rows: Vec<PostSummaryRow> = build_search_query(query)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = build_count_query(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok((rows.into_iter().map(|r| r.into_summary()).collect(), total))
    }

    async fn find_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, blog_id, title, content, view_count, like_count,
                   created_at, updated_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn find_owner(&self, post_id: PostId) -> BlogResult<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT b.user_id
            FROM posts p
            JOIN blogs b ON b.blog_id = p.blog_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner.map(UserId::from_i64))
    }

    async fn read_detail(&self, post_id: PostId) -> BlogResult<Option<PostDetail>> {
        // View bump first; zero rows means the post does not exist
        let bumped = sqlx::query(
            "UPDATE posts SET view_count = COALESCE(view_count, 0) + 1 WHERE post_id = $1",
        )
        .bind(post_id.as_i64())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if bumped == 0 {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, PostAuthorRow>(
            r#"
            SELECT p.post_id, p.blog_id, p.title, p.content, p.view_count,
                   p.like_count, p.created_at, p.updated_at,
                   u.user_id, u.nickname
            FROM posts p
            JOIN blogs b ON b.blog_id = p.blog_id
            JOIN users u ON u.user_id = b.user_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tags = self.tags_for_post(post_id).await?;
        let comments = self.threads_for_post(post_id).await?;

        let (post, author) = row.into_parts();

        Ok(Some(PostDetail {
            post,
            author,
            tags,
            comments,
        }))
    }

    async fn create(&self, blog_id: BlogId, title: &str, content: &str) -> BlogResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (blog_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING post_id, blog_id, title, content, view_count, like_count,
                      created_at, updated_at
            "#,
        )
        .bind(blog_id.as_i64())
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }

    async fn update(&self, post_id: PostId, title: &str, content: &str) -> BlogResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, content = $3, updated_at = now()
            WHERE post_id = $1
            RETURNING post_id, blog_id, title, content, view_count, like_count,
                      created_at, updated_at
            "#,
        )
        .bind(post_id.as_i64())
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BlogError::PostNotFound(post_id.as_i64()))?;

        Ok(row.into_post())
    }

    async fn delete_cascade(&self, post_id: PostId) -> BlogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM likes WHERE post_id = $1")
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tag_maps WHERE post_id = $1")
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_author(&self, post_id: PostId) -> BlogResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT u.user_id, u.nickname
            FROM posts p
            JOIN blogs b ON b.blog_id = p.blog_id
            JOIN users u ON u.user_id = b.user_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_author()))
    }

    async fn find_blog_by_user(&self, user_id: UserId) -> BlogResult<Option<BlogId>> {
        let blog_id = sqlx::query_scalar::<_, i64>("SELECT blog_id FROM blogs WHERE user_id = $1")
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(blog_id.map(BlogId::from_i64))
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn find_by_title(&self, title: &str) -> BlogResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>("SELECT tag_id, title FROM tags WHERE title = $1")
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.into_tag()))
    }

    async fn tags_for_post(&self, post_id: PostId) -> BlogResult<Vec<String>> {
        let titles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT t.title
            FROM tag_maps tm
            JOIN tags t ON t.tag_id = tm.tag_id
            WHERE tm.post_id = $1
            ORDER BY tm.tag_map_id
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(titles)
    }

    async fn replace_post_tags(
        &self,
        post_id: PostId,
        titles: &[String],
    ) -> BlogResult<Vec<String>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tag_maps WHERE post_id = $1")
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?;

        let mut saved = Vec::with_capacity(titles.len());
        for title in titles {
            // Find-or-create: DO NOTHING leaves concurrent winners in
            // place, the re-fetch picks up whichever row won
            sqlx::query("INSERT INTO tags (title) VALUES ($1) ON CONFLICT (title) DO NOTHING")
                .bind(title)
                .execute(&mut *tx)
                .await?;

            let tag_id = sqlx::query_scalar::<_, i64>("SELECT tag_id FROM tags WHERE title = $1")
                .bind(title)
                .fetch_one(&mut *tx)
                .await?;

            sqlx::query("INSERT INTO tag_maps (post_id, tag_id) VALUES ($1, $2)")
                .bind(post_id.as_i64())
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;

            saved.push(title.clone());
        }

        tx.commit().await?;

        Ok(saved)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn create(
        &self,
        post_id: PostId,
        author_id: UserId,
        parent_comment_id: Option<CommentId>,
        content: &str,
    ) -> BlogResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (post_id, user_id, parent_comment_id, content)
                VALUES ($1, $2, $3, $4)
                RETURNING comment_id, post_id, user_id, parent_comment_id, content,
                          created_at, updated_at
            )
            SELECT i.comment_id, i.post_id, i.parent_comment_id,
                   u.user_id, u.nickname, i.content, i.created_at, i.updated_at
            FROM inserted i
            JOIN users u ON u.user_id = i.user_id
            "#,
        )
        .bind(post_id.as_i64())
        .bind(author_id.as_i64())
        .bind(parent_comment_id.map(|id| id.as_i64()))
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn find_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.comment_id, c.post_id, c.parent_comment_id,
                   u.user_id, u.nickname, c.content, c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.user_id = c.user_id
            WHERE c.comment_id = $1
            "#,
        )
        .bind(comment_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_comment()))
    }

    async fn threads_for_post(&self, post_id: PostId) -> BlogResult<Vec<CommentThread>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.comment_id, c.post_id, c.parent_comment_id,
                   u.user_id, u.nickname, c.content, c.created_at, c.updated_at
            FROM comments c
            JOIN users u ON u.user_id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at, c.comment_id
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(assemble_threads(
            rows.into_iter().map(|r| r.into_comment()).collect(),
        ))
    }
}

/// Group a flat, time-ordered comment list into top-level threads with
/// one level of replies. Replies to unknown parents are dropped.
fn assemble_threads(comments: Vec<Comment>) -> Vec<CommentThread> {
    let mut threads: Vec<CommentThread> = Vec::new();

    for comment in comments {
        match comment.parent_comment_id {
            None => threads.push(CommentThread {
                comment,
                replies: Vec::new(),
            }),
            Some(parent_id) => {
                if let Some(thread) = threads
                    .iter_mut()
                    .find(|t| t.comment.comment_id == parent_id)
                {
                    thread.replies.push(comment);
                }
            }
        }
    }

    threads
}

// ============================================================================
// Like Repository Implementation
// ============================================================================

impl LikeRepository for PgBlogRepository {
    async fn add(&self, user_id: UserId, post_id: PostId) -> BlogResult<i64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO likes (user_id, post_id) VALUES ($1, $2)")
            .bind(user_id.as_i64())
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    BlogError::DuplicateLike
                } else {
                    BlogError::Database(e)
                }
            })?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts
            SET like_count = COALESCE(like_count, 0) + 1
            WHERE post_id = $1
            RETURNING like_count
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn remove(&self, user_id: UserId, post_id: PostId) -> BlogResult<i64> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id.as_i64())
            .bind(post_id.as_i64())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(BlogError::LikeNotFound);
        }

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE posts
            SET like_count = CASE WHEN like_count > 0 THEN like_count - 1 ELSE 0 END
            WHERE post_id = $1
            RETURNING like_count
            "#,
        )
        .bind(post_id.as_i64())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn count(&self, post_id: PostId) -> BlogResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id.as_i64())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn exists(&self, user_id: UserId, post_id: PostId) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id.as_i64())
        .bind(post_id.as_i64())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Follow Repository Implementation
// ============================================================================

impl FollowRepository for PgBlogRepository {
    async fn create(&self, follower_id: UserId, following_id: UserId) -> BlogResult<()> {
        sqlx::query("INSERT INTO follows (follower_id, following_id) VALUES ($1, $2)")
            .bind(follower_id.as_i64())
            .bind(following_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    BlogError::DuplicateFollow
                } else {
                    BlogError::Database(e)
                }
            })?;

        Ok(())
    }

    async fn delete(&self, follower_id: UserId, following_id: UserId) -> BlogResult<()> {
        let removed =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id.as_i64())
                .bind(following_id.as_i64())
                .execute(&self.pool)
                .await?
                .rows_affected();

        if removed == 0 {
            return Err(BlogError::FollowNotFound);
        }

        Ok(())
    }

    async fn followers(
        &self,
        user_id: UserId,
        page: u32,
        size: u32,
    ) -> BlogResult<(Vec<Author>, i64)> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT u.user_id, u.nickname
            FROM follows f
            JOIN users u ON u.user_id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC, u.user_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_i64())
        .bind(i64::from(size))
        .bind(i64::from(page) * i64::from(size))
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE following_id = $1")
                .bind(user_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok((rows.into_iter().map(|r| r.into_author()).collect(), total))
    }

    async fn followings(
        &self,
        user_id: UserId,
        page: u32,
        size: u32,
    ) -> BlogResult<(Vec<Author>, i64)> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT u.user_id, u.nickname
            FROM follows f
            JOIN users u ON u.user_id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC, u.user_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.as_i64())
        .bind(i64::from(size))
        .bind(i64::from(page) * i64::from(size))
        .fetch_all(&self.pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
                .bind(user_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok((rows.into_iter().map(|r| r.into_author()).collect(), total))
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

const ACCOUNT_SELECT: &str = r#"
    SELECT u.user_id, u.email, u.nickname, u.password_hash,
           b.blog_id, b.title AS blog_title
    FROM users u
    JOIN blogs b ON b.user_id = u.user_id
"#;

impl AccountRepository for PgBlogRepository {
    async fn find_by_id(&self, user_id: UserId) -> BlogResult<Option<Account>> {
        let row =
            sqlx::query_as::<_, AccountRow>(&format!("{ACCOUNT_SELECT} WHERE u.user_id = $1"))
                .bind(user_id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        nickname: Option<&str>,
        password_hash: Option<&HashedPassword>,
    ) -> BlogResult<Account> {
        sqlx::query(
            r#"
            UPDATE users
            SET nickname = COALESCE($2, nickname),
                password_hash = COALESCE($3, password_hash),
                updated_at = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(nickname)
        .bind(password_hash.map(|h| h.as_phc_string().to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BlogError::NicknameTaken
            } else {
                BlogError::Database(e)
            }
        })?;

        AccountRepository::find_by_id(self, user_id)
            .await?
            .ok_or(BlogError::UserNotFound(user_id.as_i64()))
    }

    async fn delete_cascade(&self, account: &Account) -> BlogResult<()> {
        let user_id = account.user_id.as_i64();
        let blog_id = account.blog_id.as_i64();

        let mut tx = self.pool.begin().await?;

        for (sql, bind) in ACCOUNT_CASCADE {
            let param = match bind {
                CascadeBind::User => user_id,
                CascadeBind::Blog => blog_id,
            };
            sqlx::query(sql).bind(param).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!(user_id, blog_id, "Account deleted");

        Ok(())
    }
}

/// Which id a cascade statement binds as `$1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CascadeBind {
    User,
    Blog,
}

/// Ordered deletion steps for removing an account, executed in one
/// transaction. Replies under the user's comments go first: their
/// `parent_comment_id` rows must be gone before the comments themselves,
/// and the other steps are ordered children-before-parents the same way.
pub(crate) const ACCOUNT_CASCADE: &[(&str, CascadeBind)] = &[
    // Content the user wrote elsewhere
    (
        "DELETE FROM comments WHERE parent_comment_id IN \
         (SELECT comment_id FROM comments WHERE user_id = $1)",
        CascadeBind::User,
    ),
    ("DELETE FROM comments WHERE user_id = $1", CascadeBind::User),
    ("DELETE FROM likes WHERE user_id = $1", CascadeBind::User),
    ("DELETE FROM follows WHERE follower_id = $1", CascadeBind::User),
    ("DELETE FROM follows WHERE following_id = $1", CascadeBind::User),
    // Content others left on the user's posts
    (
        "DELETE FROM comments WHERE post_id IN (SELECT post_id FROM posts WHERE blog_id = $1)",
        CascadeBind::Blog,
    ),
    (
        "DELETE FROM likes WHERE post_id IN (SELECT post_id FROM posts WHERE blog_id = $1)",
        CascadeBind::Blog,
    ),
    (
        "DELETE FROM tag_maps WHERE post_id IN (SELECT post_id FROM posts WHERE blog_id = $1)",
        CascadeBind::Blog,
    ),
    // The posts, the blog, the sessions, then the account itself
    ("DELETE FROM posts WHERE blog_id = $1", CascadeBind::Blog),
    ("DELETE FROM blogs WHERE blog_id = $1", CascadeBind::Blog),
    ("DELETE FROM sessions WHERE user_id = $1", CascadeBind::User),
    ("DELETE FROM users WHERE user_id = $1", CascadeBind::User),
];

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    blog_id: i64,
    title: String,
    content: String,
    view_count: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_i64(self.post_id),
            blog_id: BlogId::from_i64(self.blog_id),
            title: self.title,
            content: self.content,
            view_count: self.view_count,
            like_count: self.like_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostAuthorRow {
    post_id: i64,
    blog_id: i64,
    title: String,
    content: String,
    view_count: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: i64,
    nickname: String,
}

impl PostAuthorRow {
    fn into_parts(self) -> (Post, Author) {
        (
            Post {
                post_id: PostId::from_i64(self.post_id),
                blog_id: BlogId::from_i64(self.blog_id),
                title: self.title,
                content: self.content,
                view_count: self.view_count,
                like_count: self.like_count,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            Author {
                user_id: UserId::from_i64(self.user_id),
                nickname: self.nickname,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct PostSummaryRow {
    post_id: i64,
    title: String,
    content: String,
    user_id: i64,
    nickname: String,
    view_count: i64,
    like_count: i64,
    created_at: DateTime<Utc>,
    #[allow(dead_code)]
    updated_at: DateTime<Utc>,
}

impl PostSummaryRow {
    fn into_summary(self) -> PostSummary {
        PostSummary {
            post_id: PostId::from_i64(self.post_id),
            title: self.title,
            content: self.content,
            author: Author {
                user_id: UserId::from_i64(self.user_id),
                nickname: self.nickname,
            },
            view_count: self.view_count,
            like_count: self.like_count,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    user_id: i64,
    nickname: String,
}

impl AuthorRow {
    fn into_author(self) -> Author {
        Author {
            user_id: UserId::from_i64(self.user_id),
            nickname: self.nickname,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    tag_id: i64,
    title: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            tag_id: TagId::from_i64(self.tag_id),
            title: self.title,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: i64,
    post_id: i64,
    parent_comment_id: Option<i64>,
    user_id: i64,
    nickname: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_i64(self.comment_id),
            post_id: PostId::from_i64(self.post_id),
            parent_comment_id: self.parent_comment_id.map(CommentId::from_i64),
            author: Author {
                user_id: UserId::from_i64(self.user_id),
                nickname: self.nickname,
            },
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: i64,
    email: String,
    nickname: String,
    password_hash: String,
    blog_id: i64,
    blog_title: String,
}

impl AccountRow {
    fn into_account(self) -> BlogResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| BlogError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Account {
            user_id: UserId::from_i64(self.user_id),
            email: self.email,
            nickname: self.nickname,
            password_hash,
            blog_id: BlogId::from_i64(self.blog_id),
            blog_title: self.blog_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::CommentId;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            comment_id: CommentId::from_i64(id),
            post_id: PostId::from_i64(1),
            parent_comment_id: parent.map(CommentId::from_i64),
            author: Author {
                user_id: UserId::from_i64(7),
                nickname: "nick".to_string(),
            },
            content: format!("comment {}", id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_threads_nests_replies() {
        let threads = assemble_threads(vec![
            comment(1, None),
            comment(2, None),
            comment(3, Some(1)),
            comment(4, Some(2)),
            comment(5, Some(1)),
        ]);

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].replies.len(), 2);
        assert_eq!(threads[1].replies.len(), 1);
        assert_eq!(threads[0].replies[0].comment_id, CommentId::from_i64(3));
    }

    #[test]
    fn test_assemble_threads_drops_orphan_replies() {
        let threads = assemble_threads(vec![comment(1, None), comment(2, Some(99))]);

        assert_eq!(threads.len(), 1);
        assert!(threads[0].replies.is_empty());
    }
}
