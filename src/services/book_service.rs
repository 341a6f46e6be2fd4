//! Book service - catalog CRUD.
//!
//! Permission checks happen at the handler level (the decorator analog);
//! this service assumes the caller is already authorized.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Book;
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;
use crate::types::PaginationParams;

/// Book service trait for dependency injection.
#[async_trait]
pub trait BookService: Send + Sync {
    /// Get book by ID
    async fn get_book(&self, id: Uuid) -> AppResult<Book>;

    /// List books ordered by title, paginated
    async fn list_books(&self, params: PaginationParams) -> AppResult<(Vec<Book>, u64)>;

    /// Add a catalog entry, recording who added it
    async fn create_book(
        &self,
        title: String,
        author: String,
        publication_year: i32,
        added_by: Uuid,
    ) -> AppResult<Book>;

    /// Update a catalog entry
    async fn update_book(
        &self,
        id: Uuid,
        title: Option<String>,
        author: Option<String>,
        publication_year: Option<i32>,
    ) -> AppResult<Book>;

    /// Delete a catalog entry
    async fn delete_book(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of BookService.
pub struct BookManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> BookManager<R> {
    /// Create new book service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> BookService for BookManager<R> {
    async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repos
            .books()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_books(&self, params: PaginationParams) -> AppResult<(Vec<Book>, u64)> {
        self.repos.books().list(params).await
    }

    async fn create_book(
        &self,
        title: String,
        author: String,
        publication_year: i32,
        added_by: Uuid,
    ) -> AppResult<Book> {
        self.repos
            .books()
            .create(title, author, publication_year, added_by)
            .await
    }

    async fn update_book(
        &self,
        id: Uuid,
        title: Option<String>,
        author: Option<String>,
        publication_year: Option<i32>,
    ) -> AppResult<Book> {
        self.repos
            .books()
            .update(id, title, author, publication_year)
            .await
    }

    async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repos.books().delete(id).await
    }
}
