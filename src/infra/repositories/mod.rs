//! Repository layer - Data access abstraction
//!
//! One repository per aggregate, each behind a trait so services can be
//! tested against mocks.

mod access_repository;
mod book_repository;
pub(crate) mod entities;
mod follow_repository;
mod notification_repository;
mod post_repository;
mod provider;
mod user_repository;

pub use access_repository::{AccessRepository, AccessStore};
pub use book_repository::{BookRepository, BookStore};
pub use follow_repository::{FollowRepository, FollowStore};
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use post_repository::{PostRepository, PostStore};
pub use provider::{Persistence, Repositories};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use access_repository::MockAccessRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use book_repository::MockBookRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use follow_repository::MockFollowRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
