//! Service container - centralized service access.

use std::sync::Arc;

use super::{
    AccessService, AuthService, BookService, NotificationService, PostService, UserService,
};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get post service
    fn posts(&self) -> Arc<dyn PostService>;

    /// Get book service
    fn books(&self) -> Arc<dyn BookService>;

    /// Get notification service
    fn notifications(&self) -> Arc<dyn NotificationService>;

    /// Get access control service
    fn access(&self) -> Arc<dyn AccessService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    post_service: Arc<dyn PostService>,
    book_service: Arc<dyn BookService>,
    notification_service: Arc<dyn NotificationService>,
    access_service: Arc<dyn AccessService>,
}

impl Services {
    /// Create a new service container with all services initialized
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        post_service: Arc<dyn PostService>,
        book_service: Arc<dyn BookService>,
        notification_service: Arc<dyn NotificationService>,
        access_service: Arc<dyn AccessService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            post_service,
            book_service,
            notification_service,
            access_service,
        }
    }

    /// Create service container from database connection, cache and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, cache: Cache, config: Config) -> Self {
        use super::{
            AccessManager, Authenticator, BookManager, NotificationManager, PostManager,
            UserManager,
        };

        let repos = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(repos.clone(), config));
        let user_service = Arc::new(UserManager::new(repos.clone()));
        let post_service = Arc::new(PostManager::new(repos.clone()));
        let book_service = Arc::new(BookManager::new(repos.clone()));
        let notification_service = Arc::new(NotificationManager::new(repos.clone()));
        let access_service = Arc::new(AccessManager::new(repos, Arc::new(cache)));

        Self {
            auth_service,
            user_service,
            post_service,
            book_service,
            notification_service,
            access_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn posts(&self) -> Arc<dyn PostService> {
        self.post_service.clone()
    }

    fn books(&self) -> Arc<dyn BookService> {
        self.book_service.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    fn access(&self) -> Arc<dyn AccessService> {
        self.access_service.clone()
    }
}
