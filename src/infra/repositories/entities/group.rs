//! Access group entity.

use sea_orm::entity::prelude::*;

use crate::domain::Group;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Group {
    fn from(model: Model) -> Self {
        Group {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}
