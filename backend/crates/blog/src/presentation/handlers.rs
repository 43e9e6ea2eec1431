//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::{AuthConfig, Identity, MaybeIdentity};
use kernel::id::{CommentId, PostId, UserId};
use kernel::response::ApiResponse;

use crate::application::{
    AccountUseCase, CommentUseCase, FollowUseCase, LikeUseCase, PostUseCase, PostWriteInput,
    ProfileUpdateInput, TagUseCase,
};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    AccountDeleteRequest, AuthorResponse, CommentCreateRequest, CommentResponse, FollowResponse,
    LikeResponse, PageParams, PostListItemResponse, PostListParams, PostResponse, PostWriteRequest,
    ReplyCreateRequest, TagResponse, UnfollowResponse, UserProfileResponse, UserUpdateRequest,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: BlogRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/v1/posts
pub async fn list_posts<R>(
    State(state): State<BlogAppState<R>>,
    axum_extra::extract::Query(params): axum_extra::extract::Query<PostListParams>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = PostUseCase::new(state.repo.clone());

    let page = use_case.list(&params.into_query()).await?;
    let page = page.map(PostListItemResponse::from);

    Ok(Json(ApiResponse::success("Post list retrieved", page)))
}

/// GET /api/v1/posts/{post_id}
pub async fn get_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = PostUseCase::new(state.repo.clone());

    let detail = use_case.detail(PostId::from_i64(post_id)).await?;

    Ok(Json(ApiResponse::success(
        "Post retrieved",
        PostResponse::from_detail(detail),
    )))
}

/// POST /api/v1/posts
pub async fn create_post<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    Json(req): Json<PostWriteRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = PostUseCase::new(state.repo.clone());

    let output = use_case
        .create(
            identity.user_id,
            PostWriteInput {
                title: req.title,
                content: req.content,
                tags: req.tags,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Post created",
            PostResponse::from_write(output),
        )),
    ))
}

/// PUT /api/v1/posts/{post_id}
pub async fn update_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
    Json(req): Json<PostWriteRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = PostUseCase::new(state.repo.clone());

    let output = use_case
        .update(
            PostId::from_i64(post_id),
            identity.user_id,
            PostWriteInput {
                title: req.title,
                content: req.content,
                tags: req.tags,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "Post updated",
        PostResponse::from_write(output),
    )))
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
) -> BlogResult<StatusCode>
where
    R: BlogRepository,
{
    let use_case = PostUseCase::new(state.repo.clone());

    use_case
        .delete(PostId::from_i64(post_id), identity.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
    Json(req): Json<CommentCreateRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = CommentUseCase::new(state.repo.clone());

    let comment = use_case
        .comment(PostId::from_i64(post_id), identity.user_id, &req.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Comment created",
            CommentResponse::from(comment),
        )),
    ))
}

/// POST /api/v1/posts/{post_id}/replies
pub async fn create_reply<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
    Json(req): Json<ReplyCreateRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = CommentUseCase::new(state.repo.clone());

    let reply = use_case
        .reply(
            PostId::from_i64(post_id),
            identity.user_id,
            CommentId::from_i64(req.comment_id),
            &req.content,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Reply created",
            CommentResponse::from(reply),
        )),
    ))
}

// ============================================================================
// Likes
// ============================================================================

/// GET /api/v1/posts/{post_id}/like
pub async fn get_like_info<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    MaybeIdentity(identity): MaybeIdentity,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = LikeUseCase::new(state.repo.clone());

    let info = use_case
        .info(PostId::from_i64(post_id), identity.map(|i| i.user_id))
        .await?;

    Ok(Json(ApiResponse::success(
        "Like info retrieved",
        LikeResponse::from(info),
    )))
}

/// POST /api/v1/posts/{post_id}/like
pub async fn add_like<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = LikeUseCase::new(state.repo.clone());

    let info = use_case
        .add(PostId::from_i64(post_id), identity.user_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Like added",
        LikeResponse::from(info),
    )))
}

/// DELETE /api/v1/posts/{post_id}/like
pub async fn remove_like<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<i64>,
    identity: Identity,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = LikeUseCase::new(state.repo.clone());

    let info = use_case
        .remove(PostId::from_i64(post_id), identity.user_id)
        .await?;

    Ok(Json(ApiResponse::success(
        "Like removed",
        LikeResponse::from(info),
    )))
}

// ============================================================================
// Follows
// ============================================================================

/// POST /api/v1/users/{user_id}/follows
pub async fn follow_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    identity: Identity,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = FollowUseCase::new(state.repo.clone());

    let target = use_case
        .follow(identity.user_id, UserId::from_i64(user_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Follow success",
            FollowResponse {
                following_id: target.user_id.as_i64(),
                following_nickname: target.nickname,
            },
        )),
    ))
}

/// DELETE /api/v1/users/{user_id}/follows
pub async fn unfollow_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    identity: Identity,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = FollowUseCase::new(state.repo.clone());

    let target = use_case
        .unfollow(identity.user_id, UserId::from_i64(user_id))
        .await?;

    Ok(Json(ApiResponse::success(
        "Unfollow success",
        UnfollowResponse {
            unfollowed_id: target.user_id.as_i64(),
            unfollowed_nickname: target.nickname,
        },
    )))
}

/// GET /api/v1/users/{user_id}/followers
pub async fn get_followers<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = FollowUseCase::new(state.repo.clone());

    let page = use_case
        .followers(UserId::from_i64(user_id), params.page, params.size)
        .await?;
    let page = page.map(|a| AuthorResponse::from(&a));

    Ok(Json(ApiResponse::success("Follower list retrieved", page)))
}

/// GET /api/v1/users/{user_id}/followings
pub async fn get_followings<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = FollowUseCase::new(state.repo.clone());

    let page = use_case
        .followings(UserId::from_i64(user_id), params.page, params.size)
        .await?;
    let page = page.map(|a| AuthorResponse::from(&a));

    Ok(Json(ApiResponse::success("Following list retrieved", page)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/users/{user_id}
pub async fn get_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case.get_profile(UserId::from_i64(user_id)).await?;

    Ok(Json(ApiResponse::success(
        "User retrieved",
        UserProfileResponse::from(&account),
    )))
}

/// PUT /api/v1/users/{user_id}
pub async fn update_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    identity: Identity,
    Json(req): Json<UserUpdateRequest>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());

    let account = use_case
        .update_profile(
            UserId::from_i64(user_id),
            identity.user_id,
            ProfileUpdateInput {
                nickname: req.nickname,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(
        "User updated",
        UserProfileResponse::from(&account),
    )))
}

/// DELETE /api/v1/users/{user_id}
pub async fn delete_user<R>(
    State(state): State<BlogAppState<R>>,
    Path(user_id): Path<i64>,
    identity: Identity,
    Json(req): Json<AccountDeleteRequest>,
) -> BlogResult<StatusCode>
where
    R: BlogRepository,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .delete_account(UserId::from_i64(user_id), identity.user_id, req.password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Tags
// ============================================================================

/// GET /api/v1/tags/{title}
pub async fn get_tag<R>(
    State(state): State<BlogAppState<R>>,
    Path(title): Path<String>,
) -> BlogResult<impl IntoResponse>
where
    R: BlogRepository,
{
    let use_case = TagUseCase::new(state.repo.clone());

    let tag = use_case.get(&title).await?;

    Ok(Json(ApiResponse::success(
        "Tag retrieved",
        TagResponse::from(tag),
    )))
}
