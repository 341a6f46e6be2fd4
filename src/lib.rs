//! Bookclub - A community API for readers
//!
//! A single-binary HTTP service combining user accounts with follow
//! relationships, blog posts, a permission-gated book catalog, and
//! notifications, backed by Postgres and Redis.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, cache)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Seed the catalog permission groups
//! cargo run -- seed groups
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Permission, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
