//! Access control service - effective permissions, group membership, seeding.
//!
//! Effective permission sets are cached in Redis with a TTL and
//! invalidated whenever a user's memberships change. A cache failure
//! falls back to the database rather than denying the request.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::config::{GROUP_ADMINS, GROUP_EDITORS, GROUP_VIEWERS};
use crate::domain::{GroupSummary, Permission, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::{PermissionCache, Repositories};

/// Access control service trait for dependency injection.
#[async_trait]
pub trait AccessService: Send + Sync {
    /// Effective permission codes for a user, sorted, read through the cache
    async fn effective_permissions(&self, user_id: Uuid) -> AppResult<Vec<String>>;

    /// Require a catalog permission. Admin-role users pass unconditionally;
    /// everyone else needs the permission in their effective set.
    async fn require(&self, user_id: Uuid, role: UserRole, permission: Permission)
        -> AppResult<()>;

    /// All groups with their grants and member counts
    async fn list_groups(&self) -> AppResult<Vec<GroupSummary>>;

    /// Add a user to a group by name; unknown group is a 404
    async fn add_member(&self, group_name: &str, user_id: Uuid) -> AppResult<()>;

    /// Remove a user from a group by name; unknown group is a 404
    async fn remove_member(&self, group_name: &str, user_id: Uuid) -> AppResult<()>;

    /// Create the default groups and their grants; idempotent
    async fn seed_groups(&self) -> AppResult<()>;
}

/// Concrete implementation of AccessService.
pub struct AccessManager<R: Repositories> {
    repos: Arc<R>,
    cache: Arc<dyn PermissionCache>,
}

impl<R: Repositories> AccessManager<R> {
    /// Create new access service instance
    pub fn new(repos: Arc<R>, cache: Arc<dyn PermissionCache>) -> Self {
        Self { repos, cache }
    }

    async fn invalidate_cached(&self, user_id: Uuid) {
        if let Err(e) = self.cache.invalidate(user_id).await {
            warn!("Failed to invalidate permission cache for {}: {}", user_id, e);
        }
    }
}

#[async_trait]
impl<R: Repositories> AccessService for AccessManager<R> {
    async fn effective_permissions(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        match self.cache.cached_permissions(user_id).await {
            Ok(Some(codes)) => return Ok(codes),
            Ok(None) => {}
            Err(e) => warn!("Permission cache read failed for {}: {}", user_id, e),
        }

        let codes = self.repos.access().permission_codes_for(user_id).await?;

        if let Err(e) = self.cache.store_permissions(user_id, codes.clone()).await {
            warn!("Permission cache write failed for {}: {}", user_id, e);
        }

        Ok(codes)
    }

    async fn require(
        &self,
        user_id: Uuid,
        role: UserRole,
        permission: Permission,
    ) -> AppResult<()> {
        if role == UserRole::Admin {
            return Ok(());
        }

        let codes = self.effective_permissions(user_id).await?;
        if codes.iter().any(|c| c == permission.code()) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    async fn list_groups(&self) -> AppResult<Vec<GroupSummary>> {
        self.repos.access().list_groups().await
    }

    async fn add_member(&self, group_name: &str, user_id: Uuid) -> AppResult<()> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let group = self
            .repos
            .access()
            .find_group_by_name(group_name)
            .await?
            .ok_or(AppError::NotFound)?;

        self.repos.access().add_member(group.id, user_id).await?;
        self.invalidate_cached(user_id).await;

        Ok(())
    }

    async fn remove_member(&self, group_name: &str, user_id: Uuid) -> AppResult<()> {
        let group = self
            .repos
            .access()
            .find_group_by_name(group_name)
            .await?
            .ok_or(AppError::NotFound)?;

        self.repos.access().remove_member(group.id, user_id).await?;
        self.invalidate_cached(user_id).await;

        Ok(())
    }

    async fn seed_groups(&self) -> AppResult<()> {
        // Editors get create and edit but not view. The grant sets are
        // intentional: view is carried by the viewers group.
        let editors = self.repos.access().ensure_group(GROUP_EDITORS).await?;
        self.repos
            .access()
            .grant(editors.id, Permission::CanCreate.code())
            .await?;
        self.repos
            .access()
            .grant(editors.id, Permission::CanEdit.code())
            .await?;

        let viewers = self.repos.access().ensure_group(GROUP_VIEWERS).await?;
        self.repos
            .access()
            .grant(viewers.id, Permission::CanView.code())
            .await?;

        let admins = self.repos.access().ensure_group(GROUP_ADMINS).await?;
        for permission in Permission::all() {
            self.repos.access().grant(admins.id, permission.code()).await?;
        }

        Ok(())
    }
}
