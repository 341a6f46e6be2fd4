//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users_table;
mod m20240601_000002_create_follows_table;
mod m20240601_000003_create_posts_table;
mod m20240601_000004_create_books_table;
mod m20240601_000005_create_notifications_table;
mod m20240601_000006_create_access_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users_table::Migration),
            Box::new(m20240601_000002_create_follows_table::Migration),
            Box::new(m20240601_000003_create_posts_table::Migration),
            Box::new(m20240601_000004_create_books_table::Migration),
            Box::new(m20240601_000005_create_notifications_table::Migration),
            Box::new(m20240601_000006_create_access_tables::Migration),
        ]
    }
}
