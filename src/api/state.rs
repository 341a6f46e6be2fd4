//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AccessService, AuthService, BookService, NotificationService, PostService, ServiceContainer,
    Services, UserService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Post service
    pub post_service: Arc<dyn PostService>,
    /// Book service
    pub book_service: Arc<dyn BookService>,
    /// Notification service
    pub notification_service: Arc<dyn NotificationService>,
    /// Access control service
    pub access_service: Arc<dyn AccessService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            cache.as_ref().clone(),
            config,
        );

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            post_service: container.posts(),
            book_service: container.books(),
            notification_service: container.notifications(),
            access_service: container.access(),
            cache,
            database,
        }
    }
}
