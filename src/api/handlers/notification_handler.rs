//! Notification handlers - the caller's own inbox only.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::NotificationResponse;
use crate::errors::AppResult;
use crate::types::{NoContent, Paginated, PaginationParams};

/// Unread-only filter for the notification list
#[derive(Debug, Deserialize)]
pub struct NotificationFilter {
    #[serde(default)]
    pub unread_only: bool,
}

/// Bulk mark-read result
#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    /// Number of notifications marked read
    pub marked_read: u64,
}

/// Unread notification count
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub count: u64,
}

/// Create notification routes (all require authentication)
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
}

/// List own notifications, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(
        ("unread_only" = Option<bool>, Query, description = "Only unread notifications"),
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated notification list"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(filter): Query<NotificationFilter>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<NotificationResponse>>> {
    let (notifications, total) = state
        .notification_service
        .list(user.id, filter.unread_only, params.clone())
        .await?;
    let paginated = Paginated::new(notifications, &params, total).map(NotificationResponse::from);

    Ok(Json(paginated))
}

/// Mark one notification read
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.notification_service.mark_read(user.id, id).await?;
    Ok(NoContent)
}

/// Mark every unread notification read
#[utoipa::path(
    post,
    path = "/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All marked read", body = MarkAllReadResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let marked_read = state.notification_service.mark_all_read(user.id).await?;
    Ok(Json(MarkAllReadResponse { marked_read }))
}

/// Count unread notifications
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.notification_service.unread_count(user.id).await?;
    Ok(Json(UnreadCountResponse { count }))
}
