//! User handlers - profiles, follows and admin account management.

use axum::{
    extract::{Extension, Path, Query, State},
    handler::Handler,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{auth_middleware, require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{OwnProfileResponse, ProfileResponse, User, UserResponse};
use crate::errors::AppResult;
use crate::types::{MessageResponse, NoContent, Paginated, PaginationParams};

/// Public user listing entry (no email)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    #[schema(example = "bookworm42")]
    pub username: String,
    pub bio: String,
    pub avatar_url: Option<String>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            bio: user.bio,
            avatar_url: user.avatar_url,
        }
    }
}

/// Profile update request
#[derive(Debug, serde::Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "new@example.com")]
    pub email: Option<String>,
    /// Short biography (up to 100 characters)
    #[validate(length(max = 100, message = "Bio must be at most 100 characters"))]
    pub bio: Option<String>,
    /// Avatar image URL
    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,
}

/// Create user routes.
///
/// Profile reads are public; everything else requires authentication.
/// The `/:id` path carries both the public GET and the admin DELETE, so
/// the auth middleware is layered per handler there instead of on the
/// router.
pub fn user_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    let protected = Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_own_profile).put(update_own_profile))
        .route("/:id/follow", post(follow_user))
        .route("/:id/unfollow", post(unfollow_user))
        .route_layer(auth.clone());

    Router::new()
        .route(
            "/:id",
            get(get_user_profile).delete(delete_user.layer(auth)),
        )
        .route("/:id/followers", get(list_followers))
        .route("/:id/following", get(list_following))
        .merge(protected)
}

/// Get own profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile", body = OwnProfileResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<OwnProfileResponse>> {
    let profile = state.user_service.profile(user.id).await?;
    Ok(Json(OwnProfileResponse::from(profile)))
}

/// Update own profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update_own_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let updated = state
        .user_service
        .update_profile(user.id, payload.email, payload.bio, payload.avatar_url)
        .await?;

    Ok(Json(UserResponse::from(updated)))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Public profile", body = ProfileResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProfileResponse>> {
    let profile = state.user_service.profile(id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated user list"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    require_admin(&user)?;

    let (users, total) = state.user_service.list_users(params.clone()).await?;
    let paginated = Paginated::new(users, &params, total).map(UserResponse::from);

    Ok(Json(paginated))
}

/// Delete a user account (admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    require_admin(&user)?;
    state.user_service.delete_user(user.id, id).await?;
    Ok(NoContent)
}

/// Start following a user
#[utoipa::path(
    post,
    path = "/users/{id}/follow",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User to follow")),
    responses(
        (status = 200, description = "Following (idempotent)", body = MessageResponse),
        (status = 400, description = "Cannot follow yourself"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn follow_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.follow(user.id, id).await?;
    Ok(Json(MessageResponse::new("Following")))
}

/// Stop following a user
#[utoipa::path(
    post,
    path = "/users/{id}/unfollow",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User to unfollow")),
    responses(
        (status = 200, description = "No longer following (idempotent)", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.unfollow(user.id, id).await?;
    Ok(Json(MessageResponse::new("Unfollowed")))
}

/// List a user's followers
#[utoipa::path(
    get,
    path = "/users/{id}/followers",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Followers", body = [UserSummary]),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_followers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.user_service.followers(id).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// List the users a user follows
#[utoipa::path(
    get,
    path = "/users/{id}/following",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Followed users", body = [UserSummary]),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_following(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state.user_service.following(id).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}
