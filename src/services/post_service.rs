//! Post service - blog post CRUD and the follow feed.
//!
//! Update and delete are author-only: admins get no special treatment
//! for posts, only the author passes the check.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Post;
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;
use crate::types::PaginationParams;

/// Post service trait for dependency injection.
#[async_trait]
pub trait PostService: Send + Sync {
    /// Get post by ID
    async fn get_post(&self, id: Uuid) -> AppResult<Post>;

    /// List posts newest first, optionally filtered by author
    async fn list_posts(
        &self,
        author_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)>;

    /// Posts authored by users the caller follows, newest first
    async fn feed(&self, user_id: Uuid, params: PaginationParams)
        -> AppResult<(Vec<Post>, u64)>;

    /// Create a post authored by the caller
    async fn create_post(&self, author_id: Uuid, title: String, content: String)
        -> AppResult<Post>;

    /// Update a post; only its author may
    async fn update_post(
        &self,
        caller_id: Uuid,
        id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post>;

    /// Delete a post; only its author may
    async fn delete_post(&self, caller_id: Uuid, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of PostService.
pub struct PostManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> PostManager<R> {
    /// Create new post service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }

    async fn find_owned(&self, caller_id: Uuid, id: Uuid) -> AppResult<Post> {
        let post = self
            .repos
            .posts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if post.author_id != caller_id {
            return Err(AppError::Forbidden);
        }

        Ok(post)
    }
}

#[async_trait]
impl<R: Repositories> PostService for PostManager<R> {
    async fn get_post(&self, id: Uuid) -> AppResult<Post> {
        self.repos
            .posts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_posts(
        &self,
        author_id: Option<Uuid>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)> {
        self.repos.posts().list(author_id, params).await
    }

    async fn feed(
        &self,
        user_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<(Vec<Post>, u64)> {
        let followed = self.repos.follows().followed_ids(user_id).await?;
        self.repos.posts().list_by_authors(followed, params).await
    }

    async fn create_post(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> AppResult<Post> {
        self.repos.posts().create(author_id, title, content).await
    }

    async fn update_post(
        &self,
        caller_id: Uuid,
        id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> AppResult<Post> {
        self.find_owned(caller_id, id).await?;
        self.repos.posts().update(id, title, content).await
    }

    async fn delete_post(&self, caller_id: Uuid, id: Uuid) -> AppResult<()> {
        self.find_owned(caller_id, id).await?;
        self.repos.posts().delete(id).await
    }
}
