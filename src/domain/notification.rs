//! Notification domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    /// User whose action produced the notification
    pub actor_id: Uuid,
    pub verb: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub actor_id: Uuid,
    #[schema(example = "started following you")]
    pub verb: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            actor_id: notification.actor_id,
            verb: notification.verb,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}
