//! Application services layer - use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod access_service;
mod auth_service;
mod book_service;
pub mod container;
mod notification_service;
mod post_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use access_service::{AccessManager, AccessService};
pub use auth_service::{AuthService, Authenticator, Claims, Registration, TokenResponse};
pub use book_service::{BookManager, BookService};
pub use notification_service::{NotificationManager, NotificationService};
pub use post_service::{PostManager, PostService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
