//! Migration: Create the books table.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Books::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(
                        ColumnDef::new(Books::PublicationYear)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Books::AddedBy).uuid().null())
                    .col(
                        ColumnDef::new(Books::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Books::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_books_added_by")
                            .from(Books::Table, Books::AddedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Title,
    Author,
    PublicationYear,
    AddedBy,
    CreatedAt,
    UpdatedAt,
}
