//! Repository provider - one injection point for all repositories.
//!
//! Services depend on this trait instead of individual stores so tests
//! can swap in mocks per aggregate.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    AccessRepository, AccessStore, BookRepository, BookStore, FollowRepository, FollowStore,
    NotificationRepository, NotificationStore, PostRepository, PostStore, UserRepository,
    UserStore,
};

/// Repository provider trait for dependency injection.
pub trait Repositories: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get follow repository
    fn follows(&self) -> Arc<dyn FollowRepository>;

    /// Get post repository
    fn posts(&self) -> Arc<dyn PostRepository>;

    /// Get book repository
    fn books(&self) -> Arc<dyn BookRepository>;

    /// Get notification repository
    fn notifications(&self) -> Arc<dyn NotificationRepository>;

    /// Get access repository
    fn access(&self) -> Arc<dyn AccessRepository>;
}

/// Concrete provider backed by a single database connection
pub struct Persistence {
    user_repo: Arc<UserStore>,
    follow_repo: Arc<FollowStore>,
    post_repo: Arc<PostStore>,
    book_repo: Arc<BookStore>,
    notification_repo: Arc<NotificationStore>,
    access_repo: Arc<AccessStore>,
}

impl Persistence {
    /// Create the full repository set over one connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            follow_repo: Arc::new(FollowStore::new(db.clone())),
            post_repo: Arc::new(PostStore::new(db.clone())),
            book_repo: Arc::new(BookStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db.clone())),
            access_repo: Arc::new(AccessStore::new(db)),
        }
    }
}

impl Repositories for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn follows(&self) -> Arc<dyn FollowRepository> {
        self.follow_repo.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.post_repo.clone()
    }

    fn books(&self) -> Arc<dyn BookRepository> {
        self.book_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }

    fn access(&self) -> Arc<dyn AccessRepository> {
        self.access_repo.clone()
    }
}
