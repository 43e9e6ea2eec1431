//! Blog Router
//!
//! One identity-resolving layer wraps every route; protected handlers
//! enforce authentication through the `Identity` extractor.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use auth::application::config::AuthConfig;
use auth::domain::repository::SessionRepository;
use auth::presentation::middleware::{AuthMiddlewareState, attach_identity};

use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Create the Blog router with PostgreSQL repositories
pub fn blog_router(
    repo: PgBlogRepository,
    session_repo: auth::PgAuthRepository,
    config: Arc<AuthConfig>,
) -> Router {
    blog_router_generic(repo, session_repo, config)
}

/// Create a generic Blog router for any repository implementation
pub fn blog_router_generic<R, S>(repo: R, session_repo: S, config: Arc<AuthConfig>) -> Router
where
    R: BlogRepository,
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = BlogAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    let auth_state = AuthMiddlewareState::new(Arc::new(session_repo), config);

    let identity_layer = axum::middleware::from_fn(move |req: Request<Body>, next: Next| {
        let auth_state = auth_state.clone();
        async move { attach_identity(auth_state, req, next).await }
    });

    Router::new()
        .route("/posts", get(handlers::list_posts::<R>).post(handlers::create_post::<R>))
        .route(
            "/posts/{post_id}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route("/posts/{post_id}/comments", post(handlers::create_comment::<R>))
        .route("/posts/{post_id}/replies", post(handlers::create_reply::<R>))
        .route(
            "/posts/{post_id}/like",
            get(handlers::get_like_info::<R>)
                .post(handlers::add_like::<R>)
                .delete(handlers::remove_like::<R>),
        )
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route(
            "/users/{user_id}/follows",
            post(handlers::follow_user::<R>).delete(handlers::unfollow_user::<R>),
        )
        .route("/users/{user_id}/followers", get(handlers::get_followers::<R>))
        .route("/users/{user_id}/followings", get(handlers::get_followings::<R>))
        .route("/tags/{title}", get(handlers::get_tag::<R>))
        .layer(identity_layer)
        .with_state(state)
}
