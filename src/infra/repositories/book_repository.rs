//! Book repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::book::{self, ActiveModel, Entity as BookEntity};
use crate::domain::Book;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Book repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find book by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Add a catalog entry
    async fn create(
        &self,
        title: String,
        author: String,
        publication_year: i32,
        added_by: Uuid,
    ) -> AppResult<Book>;

    /// Update catalog entry fields
    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        author: Option<String>,
        publication_year: Option<i32>,
    ) -> AppResult<Book>;

    /// Delete catalog entry
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List books ordered by title, paginated
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Book>, u64)>;
}

/// Concrete implementation of BookRepository
pub struct BookStore {
    db: DatabaseConnection,
}

impl BookStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for BookStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let result = BookEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Book::from))
    }

    async fn create(
        &self,
        title: String,
        author: String,
        publication_year: i32,
        added_by: Uuid,
    ) -> AppResult<Book> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            author: Set(author),
            publication_year: Set(publication_year),
            added_by: Set(Some(added_by)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Book::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        author: Option<String>,
        publication_year: Option<i32>,
    ) -> AppResult<Book> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(author) = author {
            active.author = Set(author);
        }
        if let Some(year) = publication_year {
            active.publication_year = Set(year);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Book::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = BookEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Book>, u64)> {
        let paginator = BookEntity::find()
            .order_by_asc(book::Column::Title)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.zero_indexed_page()).await?;

        Ok((models.into_iter().map(Book::from).collect(), total))
    }
}
