//! Access repository: groups, permission grants and memberships.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use super::entities::group::{self, ActiveModel as GroupActiveModel, Entity as GroupEntity};
use super::entities::group_permission::{
    self, ActiveModel as GrantActiveModel, Entity as GrantEntity,
};
use super::entities::permission::{self, Entity as PermissionEntity};
use super::entities::user_group::{
    self, ActiveModel as MembershipActiveModel, Entity as MembershipEntity,
};
use crate::domain::{Group, GroupSummary};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Access repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// Effective permission codes for a user: the union over their groups
    async fn permission_codes_for(&self, user_id: Uuid) -> AppResult<Vec<String>>;

    /// Find a group by name
    async fn find_group_by_name(&self, name: &str) -> AppResult<Option<Group>>;

    /// Get-or-create a group by name
    async fn ensure_group(&self, name: &str) -> AppResult<Group>;

    /// Grant a permission (by code) to a group; idempotent
    async fn grant(&self, group_id: Uuid, permission_code: &str) -> AppResult<()>;

    /// Add a user to a group; idempotent
    async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Remove a user from a group; idempotent
    async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// All groups with their permission codes and member counts
    async fn list_groups(&self) -> AppResult<Vec<GroupSummary>>;
}

/// Concrete implementation of AccessRepository
pub struct AccessStore {
    db: DatabaseConnection,
}

impl AccessStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn permission_codes_for_groups(&self, group_ids: Vec<Uuid>) -> AppResult<Vec<String>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let permission_ids: Vec<Uuid> = GrantEntity::find()
            .filter(group_permission::Column::GroupId.is_in(group_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|grant| grant.permission_id)
            .collect();

        if permission_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut codes: Vec<String> = PermissionEntity::find()
            .filter(permission::Column::Id.is_in(permission_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|p| p.code)
            .collect();

        codes.sort();
        codes.dedup();
        Ok(codes)
    }
}

#[async_trait]
impl AccessRepository for AccessStore {
    async fn permission_codes_for(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let group_ids: Vec<Uuid> = MembershipEntity::find()
            .filter(user_group::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|m| m.group_id)
            .collect();

        self.permission_codes_for_groups(group_ids).await
    }

    async fn find_group_by_name(&self, name: &str) -> AppResult<Option<Group>> {
        let result = GroupEntity::find()
            .filter(group::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Group::from))
    }

    async fn ensure_group(&self, name: &str) -> AppResult<Group> {
        if let Some(existing) = self.find_group_by_name(name).await? {
            return Ok(existing);
        }

        let active_model = GroupActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Group::from(model))
    }

    async fn grant(&self, group_id: Uuid, permission_code: &str) -> AppResult<()> {
        let permission = PermissionEntity::find()
            .filter(permission::Column::Code.eq(permission_code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let already = GrantEntity::find()
            .filter(group_permission::Column::GroupId.eq(group_id))
            .filter(group_permission::Column::PermissionId.eq(permission.id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        if already == 0 {
            let active_model = GrantActiveModel {
                group_id: Set(group_id),
                permission_id: Set(permission.id),
            };
            active_model.insert(&self.db).await.map_err(AppError::from)?;
        }

        Ok(())
    }

    async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let already = MembershipEntity::find()
            .filter(user_group::Column::GroupId.eq(group_id))
            .filter(user_group::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        if already == 0 {
            let active_model = MembershipActiveModel {
                user_id: Set(user_id),
                group_id: Set(group_id),
            };
            active_model.insert(&self.db).await.map_err(AppError::from)?;
        }

        Ok(())
    }

    async fn remove_member(&self, group_id: Uuid, user_id: Uuid) -> AppResult<()> {
        MembershipEntity::delete_many()
            .filter(user_group::Column::GroupId.eq(group_id))
            .filter(user_group::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn list_groups(&self) -> AppResult<Vec<GroupSummary>> {
        let groups = GroupEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut summaries = Vec::with_capacity(groups.len());
        for g in groups {
            let permissions = self.permission_codes_for_groups(vec![g.id]).await?;
            let members = MembershipEntity::find()
                .filter(user_group::Column::GroupId.eq(g.id))
                .count(&self.db)
                .await
                .map_err(AppError::from)?;

            summaries.push(GroupSummary {
                name: g.name,
                permissions,
                members,
            });
        }

        Ok(summaries)
    }
}
