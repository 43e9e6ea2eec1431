//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{BlogId, UserId};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, Nickname};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at < now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create_with_blog(&self, new_user: &NewUser) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let (user_id, created_at, updated_at): (i64, DateTime<Utc>, DateTime<Utc>) =
            sqlx::query_as(
                r#"
                INSERT INTO users (email, nickname, password_hash)
                VALUES ($1, $2, $3)
                RETURNING user_id, created_at, updated_at
                "#,
            )
            .bind(new_user.email.as_str())
            .bind(new_user.nickname.as_str())
            .bind(new_user.password_hash.as_phc_string())
            .fetch_one(&mut *tx)
            .await?;

        let blog_title = new_user.default_blog_title();

        let (blog_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO blogs (user_id, title)
            VALUES ($1, $2)
            RETURNING blog_id
            "#,
        )
        .bind(user_id)
        .bind(&blog_title)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(User {
            user_id: UserId::from_i64(user_id),
            email: new_user.email.clone(),
            nickname: new_user.nickname.clone(),
            password_hash: new_user.password_hash.clone(),
            blog_id: BlogId::from_i64(blog_id),
            blog_title,
            created_at,
            updated_at,
        })
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.user_id,
                u.email,
                u.nickname,
                u.password_hash,
                b.blog_id,
                b.title AS blog_title,
                u.created_at,
                u.updated_at
            FROM users u
            JOIN blogs b ON b.user_id = u.user_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                u.user_id,
                u.email,
                u.nickname,
                u.password_hash,
                b.blog_id,
                b.title AS blog_title,
                u.created_at,
                u.updated_at
            FROM users u
            JOIN blogs b ON b.user_id = u.user_id
            WHERE u.email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1)",
        )
        .bind(nickname.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                email,
                expires_at,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_i64())
        .bind(&session.email)
        .bind(session.expires_at)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                email,
                expires_at,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1 AND expires_at > now()
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn update(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                expires_at = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.cleanup_expired().await
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    nickname: String,
    password_hash: String,
    blog_id: i64,
    blog_title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_i64(self.user_id),
            email: Email::from_db(self.email),
            nickname: Nickname::from_db(self.nickname),
            password_hash,
            blog_id: BlogId::from_i64(self.blog_id),
            blog_title: self.blog_title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: i64,
    email: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            user_id: UserId::from_i64(self.user_id),
            email: self.email,
            expires_at: self.expires_at,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
