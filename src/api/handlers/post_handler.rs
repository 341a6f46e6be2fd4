//! Blog post handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    handler::Handler,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, CurrentUser};
use crate::api::AppState;
use crate::domain::PostResponse;
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Post creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Post title (1-200 characters)
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[schema(example = "Thoughts on chapter three", max_length = 200)]
    pub title: String,
    /// Post body
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

/// Post update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    /// New title (1-200 characters)
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    /// New body
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,
}

/// Author filter for the public post list
#[derive(Debug, Deserialize)]
pub struct PostFilter {
    pub author: Option<Uuid>,
}

/// Create post routes.
///
/// Reads are public; writes and the feed require authentication. The
/// `/` and `/:id` paths mix both, so auth is layered per handler.
pub fn post_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_posts).post(create_post.layer(auth.clone())),
        )
        .route("/feed", get(feed.layer(auth.clone())))
        .route(
            "/:id",
            get(get_post)
                .put(update_post.layer(auth.clone()))
                .delete(delete_post.layer(auth)),
        )
}

/// List published posts, newest first
#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    params(
        ("author" = Option<Uuid>, Query, description = "Filter by author"),
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated post list")
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<PostResponse>>> {
    let (posts, total) = state
        .post_service
        .list_posts(filter.author, params.clone())
        .await?;
    let paginated = Paginated::new(posts, &params, total).map(PostResponse::from);

    Ok(Json(paginated))
}

/// Posts from followed users, newest first
#[utoipa::path(
    get,
    path = "/posts/feed",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated feed"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn feed(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<PostResponse>>> {
    let (posts, total) = state.post_service.feed(user.id, params.clone()).await?;
    let paginated = Paginated::new(posts, &params, total).map(PostResponse::from);

    Ok(Json(paginated))
}

/// Get a post
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "Posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post detail", body = PostResponse),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PostResponse>> {
    let post = state.post_service.get_post(id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Publish a post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post published", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> AppResult<Created<PostResponse>> {
    // The author is always the caller, never taken from the body
    let post = state
        .post_service
        .create_post(user.id, payload.title, payload.content)
        .await?;

    Ok(Created(PostResponse::from(post)))
}

/// Update a post (author only)
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Only the author may edit"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    let post = state
        .post_service
        .update_post(user.id, id, payload.title, payload.content)
        .await?;

    Ok(Json(PostResponse::from(post)))
}

/// Delete a post (author only)
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "Posts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Only the author may delete"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.post_service.delete_post(user.id, id).await?;
    Ok(NoContent)
}
