//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Post not found
    #[error("Post not found: {0}")]
    PostNotFound(i64),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Comment not found
    #[error("Comment not found: {0}")]
    CommentNotFound(i64),

    /// Tag not found
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Like row not found
    #[error("Like not found")]
    LikeNotFound,

    /// Follow edge not found
    #[error("Follow not found")]
    FollowNotFound,

    /// Caller is not allowed to touch the resource
    #[error("Forbidden")]
    Forbidden,

    /// Already liked
    #[error("Already liked")]
    DuplicateLike,

    /// Already following
    #[error("Already following")]
    DuplicateFollow,

    /// Nickname already taken (profile update)
    #[error("Nickname already taken")]
    NicknameTaken,

    /// Cannot follow yourself
    #[error("Cannot follow yourself")]
    SelfFollow,

    /// Wrong password confirmation
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Request field validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::PostNotFound(_)
            | BlogError::UserNotFound(_)
            | BlogError::CommentNotFound(_)
            | BlogError::TagNotFound(_)
            | BlogError::LikeNotFound
            | BlogError::FollowNotFound => StatusCode::NOT_FOUND,
            BlogError::Forbidden => StatusCode::FORBIDDEN,
            BlogError::DuplicateLike | BlogError::DuplicateFollow | BlogError::NicknameTaken => {
                StatusCode::CONFLICT
            }
            BlogError::SelfFollow | BlogError::Validation(_) => StatusCode::BAD_REQUEST,
            BlogError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BlogError::Database(_) | BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound(_)
            | BlogError::UserNotFound(_)
            | BlogError::CommentNotFound(_)
            | BlogError::TagNotFound(_)
            | BlogError::LikeNotFound
            | BlogError::FollowNotFound => ErrorKind::NotFound,
            BlogError::Forbidden => ErrorKind::Forbidden,
            BlogError::DuplicateLike | BlogError::DuplicateFollow | BlogError::NicknameTaken => {
                ErrorKind::Conflict
            }
            BlogError::SelfFollow | BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::InvalidCredentials => ErrorKind::Unauthorized,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();

        // Do not leak internal detail for 5xx errors
        let app_error = if self.kind().is_server_error() {
            AppError::internal("Internal server error")
        } else {
            self.to_app_error()
        };

        app_error.into_response()
    }
}

impl From<platform::password::PasswordPolicyError> for BlogError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        BlogError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for BlogError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        BlogError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            BlogError::PostNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(BlogError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BlogError::DuplicateLike.status_code(), StatusCode::CONFLICT);
        assert_eq!(BlogError::SelfFollow.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BlogError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(BlogError::DuplicateFollow.kind(), ErrorKind::Conflict);
        assert_eq!(BlogError::FollowNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(BlogError::Validation("bad".into()).kind(), ErrorKind::BadRequest);
    }
}
