//! Follow repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::follow::{self, ActiveModel, Entity as FollowEntity};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Follow repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Check whether the follow edge exists
    async fn exists(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<bool>;

    /// Insert a follow edge
    async fn insert(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()>;

    /// Remove a follow edge; removing an absent edge is a no-op
    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()>;

    /// IDs of users following the given user
    async fn follower_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// IDs of users the given user follows
    async fn followed_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Number of followers
    async fn count_followers(&self, user_id: Uuid) -> AppResult<u64>;

    /// Number of users followed
    async fn count_following(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of FollowRepository
pub struct FollowStore {
    db: DatabaseConnection,
}

impl FollowStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for FollowStore {
    async fn exists(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<bool> {
        let count = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowedId.eq(followed_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn insert(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()> {
        let active_model = ActiveModel {
            follower_id: Set(follower_id),
            followed_id: Set(followed_id),
            created_at: Set(chrono::Utc::now()),
        };

        active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()> {
        FollowEntity::delete_many()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .filter(follow::Column::FollowedId.eq(followed_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn follower_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = FollowEntity::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .select_only()
            .column(follow::Column::FollowerId)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }

    async fn followed_ids(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .select_only()
            .column(follow::Column::FollowedId)
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ids)
    }

    async fn count_followers(&self, user_id: Uuid) -> AppResult<u64> {
        FollowEntity::find()
            .filter(follow::Column::FollowedId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn count_following(&self, user_id: Uuid) -> AppResult<u64> {
        FollowEntity::find()
            .filter(follow::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }
}
