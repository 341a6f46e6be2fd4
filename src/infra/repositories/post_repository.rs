//! Post repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::post::{self, ActiveModel, Entity as PostEntity};
use crate::domain::Post;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Post repository trait for dependency injection.
///
/// Lists are ordered by `published_at` descending.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>>;

    /// Create a new post; `published_at` is set to now
    async fn create(&self, author_id: Uuid, title: String, content: String) -> AppResult<Post>;

    /// Update title and/or content
    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post>;

    /// Delete post by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List posts, optionally restricted to one author
    async fn list(
        &self,
        author_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)>;

    /// List posts authored by any of the given users (the follow feed)
    async fn list_by_authors(
        &self,
        author_ids: Vec<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)>;
}

/// Concrete implementation of PostRepository
pub struct PostStore {
    db: DatabaseConnection,
}

impl PostStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Post::from))
    }

    async fn create(&self, author_id: Uuid, title: String, content: String) -> AppResult<Post> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            author_id: Set(author_id),
            title: Set(title),
            content: Set(content),
            published_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(content) = content {
            active.content = Set(content);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Post::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(
        &self,
        author_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)> {
        let mut query = PostEntity::find();
        if let Some(author_id) = author_id {
            query = query.filter(post::Column::AuthorId.eq(author_id));
        }

        let paginator = query
            .order_by_desc(post::Column::PublishedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Post::from).collect(), total))
    }

    async fn list_by_authors(
        &self,
        author_ids: Vec<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)> {
        if author_ids.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let paginator = PostEntity::find()
            .filter(post::Column::AuthorId.is_in(author_ids))
            .order_by_desc(post::Column::PublishedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Post::from).collect(), total))
    }
}
