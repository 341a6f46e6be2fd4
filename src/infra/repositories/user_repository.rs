//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Fetch users by id, preserving no particular order
    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>>;

    /// Create a new user
    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        role: String,
        bio: String,
        avatar_url: Option<String>,
    ) -> AppResult<User>;

    /// Update profile fields; absent fields stay unchanged
    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> AppResult<User>;

    /// Delete user by ID; related rows cascade at the database level
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List users ordered by username, paginated
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_many(&self, ids: Vec<Uuid>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
        role: String,
        bio: String,
        avatar_url: Option<String>,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            bio: Set(bio),
            avatar_url: Set(avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(email) = email {
            active.email = Set(email);
        }
        if let Some(bio) = bio {
            active.bio = Set(bio);
        }
        if let Some(avatar_url) = avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_asc(user::Column::Username)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
