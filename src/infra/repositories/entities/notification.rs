//! Notification database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Notification;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub verb: String,
    pub read: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Notification {
    fn from(model: Model) -> Self {
        Notification {
            id: model.id,
            recipient_id: model.recipient_id,
            actor_id: model.actor_id,
            verb: model.verb,
            read: model.read,
            created_at: model.created_at,
        }
    }
}
