//! Notification service - per-recipient inbox operations.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Notification;
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;
use crate::types::PaginationParams;

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// List the caller's notifications, newest first
    async fn list(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        params: PaginationParams,
    ) -> AppResult<(Vec<Notification>, u64)>;

    /// Mark one notification read. Another user's notification is a 404,
    /// not a 403: existence is not revealed.
    async fn mark_read(&self, recipient_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Mark every unread notification read, returning the number updated
    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Count unread notifications
    async fn unread_count(&self, recipient_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of NotificationService.
pub struct NotificationManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> NotificationManager<R> {
    /// Create new notification service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> NotificationService for NotificationManager<R> {
    async fn list(
        &self,
        recipient_id: Uuid,
        unread_only: bool,
        params: PaginationParams,
    ) -> AppResult<(Vec<Notification>, u64)> {
        self.repos
            .notifications()
            .list_for(recipient_id, unread_only, params)
            .await
    }

    async fn mark_read(&self, recipient_id: Uuid, id: Uuid) -> AppResult<()> {
        let updated = self.repos.notifications().mark_read(recipient_id, id).await?;
        if !updated {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64> {
        self.repos.notifications().mark_all_read(recipient_id).await
    }

    async fn unread_count(&self, recipient_id: Uuid) -> AppResult<u64> {
        self.repos.notifications().unread_count(recipient_id).await
    }
}
