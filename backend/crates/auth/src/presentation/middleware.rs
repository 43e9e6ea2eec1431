//! Auth Middleware
//!
//! Resolves the session cookie into an explicit identity and threads it
//! through request extensions. Handlers receive the identity as an
//! extractor parameter; there is no ambient "current user" context.
//!
//! The `attach_identity` layer never rejects. Routes that require a
//! session take the `Identity` extractor, which rejects with 401 when
//! no identity was resolved; public routes with optional identity take
//! `MaybeIdentity`.

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// The authenticated caller, resolved from the session cookie
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
}

/// Identity for routes that work with or without a session
#[derive(Debug, Clone, Default)]
pub struct MaybeIdentity(pub Option<Identity>);

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> AuthMiddlewareState<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    async fn resolve(&self, token: &str) -> Option<Identity> {
        let use_case = CheckSessionUseCase::new(self.repo.clone(), self.config.clone());
        let session = use_case.get_session(token).await.ok()?;

        Some(Identity {
            user_id: session.user_id,
            email: session.email,
        })
    }
}

/// Middleware that resolves the identity when present but never rejects
pub async fn attach_identity<S>(
    state: AuthMiddlewareState<S>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    // The request body is not Sync, so only the extracted token may be
    // held across the session lookup
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let identity = match token {
        Some(token) => state.resolve(&token).await,
        None => None,
    };

    req.extensions_mut().insert(MaybeIdentity(identity));
    next.run(req).await
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<MaybeIdentity>()
            .and_then(|m| m.0.clone())
            .ok_or_else(|| AuthError::SessionInvalid.into_response())
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Routes without the attach_identity layer simply see no identity
        Ok(parts
            .extensions
            .get::<MaybeIdentity>()
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::Session;
    use crate::error::AuthResult;
    use axum::Router;
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;
    use uuid::Uuid;

    #[derive(Clone)]
    struct NoSessions;

    impl SessionRepository for NoSessions {
        async fn create(&self, _session: &Session) -> AuthResult<()> {
            Ok(())
        }

        async fn find_by_id(&self, _session_id: Uuid) -> AuthResult<Option<Session>> {
            Ok(None)
        }

        async fn update(&self, _session: &Session) -> AuthResult<()> {
            Ok(())
        }

        async fn delete(&self, _session_id: Uuid) -> AuthResult<()> {
            Ok(())
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            Ok(0)
        }
    }

    fn layered(routes: Router<()>) -> Router<()> {
        let state =
            AuthMiddlewareState::new(Arc::new(NoSessions), Arc::new(AuthConfig::development()));

        routes.layer(axum::middleware::from_fn(
            move |req: Request<Body>, next: Next| {
                let state = state.clone();
                async move { attach_identity(state, req, next).await }
            },
        ))
    }

    // The layered service must be usable from a spawned task, which
    // requires the whole middleware future to be Send
    #[tokio::test]
    async fn test_layered_service_runs_on_a_spawned_task() {
        let app = layered(Router::new().route(
            "/",
            get(|identity: MaybeIdentity| async move {
                match identity.0 {
                    Some(identity) => identity.email,
                    None => "anonymous".to_string(),
                }
            }),
        ));

        let response = tokio::spawn(async move {
            let req = Request::builder()
                .uri("/")
                .header(header::COOKIE, "vlog_session=not-a-valid-token")
                .body(Body::empty())
                .unwrap();
            app.oneshot(req).await.unwrap()
        })
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_identity_extractor_rejects_anonymous_requests() {
        let app = layered(Router::new().route(
            "/private",
            get(|identity: Identity| async move { identity.email }),
        ));

        let req = Request::builder()
            .uri("/private")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
