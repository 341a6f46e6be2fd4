//! Book catalog database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Book;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub added_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Book {
            id: model.id,
            title: model.title,
            author: model.author,
            publication_year: model.publication_year,
            added_by: model.added_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
