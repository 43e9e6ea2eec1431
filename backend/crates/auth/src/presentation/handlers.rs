//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use kernel::response::ApiResponse;
use platform::cookie::CookieConfig;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LogInInput, LogInUseCase, LogOutUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LogInRequest, SignUpRequest, UserResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            nickname: req.nickname,
        })
        .await?;

    let body = ApiResponse::success("Signup success", UserResponse::from(&output.user));

    Ok((StatusCode::CREATED, Json(body)))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /api/v1/auth/login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LogInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LogInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = session_cookie_config(&state.config).build_set_cookie(&output.session_token);

    let body = ApiResponse::success("Login success", UserResponse::from(&output.user));

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /api/v1/auth/logout
pub async fn log_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = LogOutUseCase::new(state.repo.clone(), state.config.clone());
        // A stale or tampered token still gets its cookie cleared
        let _ = use_case.execute(&token).await;
    }

    let cookie = session_cookie_config(&state.config).build_delete_cookie();

    let body = ApiResponse::<()>::message_only("Logout success");

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(body)))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn session_cookie_config(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl.as_secs() as i64),
    }
}
