use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{Activity, EventLevel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Activity,
    pub level: EventLevel,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub location: String,
    pub registration_fee: i64,
    pub max_participants: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_registration::Entity")]
    EventRegistration,
}

impl Related<super::event_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
