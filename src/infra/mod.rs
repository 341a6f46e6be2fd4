//! Infrastructure layer - External systems integration
//!
//! - Database connection, entities and repositories
//! - Redis cache (permission sets, rate limiting)

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{Cache, PermissionCache};
pub use db::{Database, Migrator};
pub use repositories::{Persistence, Repositories};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockPermissionCache;
