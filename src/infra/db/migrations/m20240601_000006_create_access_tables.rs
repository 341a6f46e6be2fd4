//! Migration: Create permission, group and membership tables.
//!
//! The four catalog permission rows are seeded here; groups and their
//! grants are created by the `seed groups` CLI command.

use sea_orm_migration::prelude::*;
use uuid::Uuid;

use super::m20240601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Permissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Permissions::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Permissions::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Groups::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Groups::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Groups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupPermissions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GroupPermissions::GroupId).uuid().not_null())
                    .col(
                        ColumnDef::new(GroupPermissions::PermissionId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(GroupPermissions::GroupId)
                            .col(GroupPermissions::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_permissions_group")
                            .from(GroupPermissions::Table, GroupPermissions::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_permissions_permission")
                            .from(GroupPermissions::Table, GroupPermissions::PermissionId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserGroups::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserGroups::GroupId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserGroups::UserId)
                            .col(UserGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_groups_user")
                            .from(UserGroups::Table, UserGroups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_groups_group")
                            .from(UserGroups::Table, UserGroups::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the fixed permission rows
        let rows = [
            ("can_view", "Can view catalog entries"),
            ("can_create", "Can add catalog entries"),
            ("can_edit", "Can edit catalog entries"),
            ("can_delete", "Can delete catalog entries"),
        ];

        for (code, name) in rows {
            let insert = Query::insert()
                .into_table(Permissions::Table)
                .columns([Permissions::Id, Permissions::Code, Permissions::Name])
                .values_panic([Uuid::new_v4().into(), code.into(), name.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupPermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Permissions {
    Table,
    Id,
    Code,
    Name,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum GroupPermissions {
    Table,
    GroupId,
    PermissionId,
}

#[derive(Iden)]
enum UserGroups {
    Table,
    UserId,
    GroupId,
}
