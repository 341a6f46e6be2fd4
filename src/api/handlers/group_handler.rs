//! Group administration handlers (admin only).

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::GroupSummary;
use crate::errors::AppResult;
use crate::types::{MessageResponse, NoContent};

/// Create group administration routes (all require authentication)
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_groups))
        .route(
            "/:name/members/:user_id",
            put(add_member).delete(remove_member),
        )
}

/// List groups with grants and member counts
#[utoipa::path(
    get,
    path = "/groups",
    tag = "Groups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Group list", body = [GroupSummary]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<GroupSummary>>> {
    require_admin(&user)?;

    let groups = state.access_service.list_groups().await?;
    Ok(Json(groups))
}

/// Add a user to a group
#[utoipa::path(
    put,
    path = "/groups/{name}/members/{user_id}",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Group name"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User added (idempotent)", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Group or user not found")
    )
)]
pub async fn add_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((name, user_id)): Path<(String, Uuid)>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&user)?;

    state.access_service.add_member(&name, user_id).await?;
    Ok(Json(MessageResponse::new(format!("Added to {}", name))))
}

/// Remove a user from a group
#[utoipa::path(
    delete,
    path = "/groups/{name}/members/{user_id}",
    tag = "Groups",
    security(("bearer_auth" = [])),
    params(
        ("name" = String, Path, description = "Group name"),
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User removed (idempotent)"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((name, user_id)): Path<(String, Uuid)>,
) -> AppResult<NoContent> {
    require_admin(&user)?;

    state.access_service.remove_member(&name, user_id).await?;
    Ok(NoContent)
}
