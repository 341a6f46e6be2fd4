//! Seed command - reference data creation.
//!
//! `seed groups` creates the default access groups and their grants;
//! `seed admin` creates an admin account. Both are safe to re-run,
//! except that an existing admin username or email is a conflict.

use crate::cli::args::{SeedArgs, SeedTarget};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};
use crate::services::{ServiceContainer, Services};

/// Execute the seed command
pub async fn execute(args: SeedArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
    let cache = Cache::connect(&config).await;

    let services = Services::from_connection(db.get_connection(), cache, config);

    match args.target {
        SeedTarget::Groups => {
            tracing::info!("Seeding default groups...");
            services.access().seed_groups().await?;
            tracing::info!("Default groups seeded");
        }
        SeedTarget::Admin {
            username,
            email,
            password,
        } => {
            tracing::info!(username = %username, "Creating admin account...");
            let admin = services.users().create_admin(username, email, password).await?;
            tracing::info!(id = %admin.id, "Admin account created");
        }
    }

    Ok(())
}
