//! Notification repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::notification::{self, ActiveModel, Entity as NotificationEntity};
use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification repository trait for dependency injection.
///
/// Every query is scoped to a recipient; notifications are never visible
/// across users.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification
    async fn insert(&self, recipient_id: Uuid, actor_id: Uuid, verb: String)
        -> AppResult<Notification>;

    /// List a recipient's notifications, newest first
    async fn list_for(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        params: PaginationParams,
    ) -> AppResult<(Vec<Notification>, u64)>;

    /// Mark one of the recipient's notifications read; false when no
    /// matching row exists
    async fn mark_read(&self, recipient_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Mark all of the recipient's unread notifications read, returning
    /// the number updated
    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Count the recipient's unread notifications
    async fn unread_count(&self, recipient_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of NotificationRepository
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn insert(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        verb: String,
    ) -> AppResult<Notification> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            recipient_id: Set(recipient_id),
            actor_id: Set(actor_id),
            verb: Set(verb),
            read: Set(false),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Notification::from(model))
    }

    async fn list_for(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        params: PaginationParams,
    ) -> AppResult<(Vec<Notification>, u64)> {
        let mut query = NotificationEntity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id));

        if unread_only {
            query = query.filter(notification::Column::Read.eq(false));
        }

        let paginator = query
            .order_by_desc(notification::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Notification::from).collect(), total))
    }

    async fn mark_read(&self, recipient_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        let result = NotificationEntity::update_many()
            .col_expr(notification::Column::Read, Expr::value(true))
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::Read.eq(false))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn unread_count(&self, recipient_id: Uuid) -> AppResult<u64> {
        NotificationEntity::find()
            .filter(notification::Column::RecipientId.eq(recipient_id))
            .filter(notification::Column::Read.eq(false))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
