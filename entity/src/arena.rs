use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "arena")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub capacity: i32,
    pub location: String,
    pub img_url: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub opening_hours_text: Option<String>,
    pub google_maps_url: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::arena_opening_hours::Entity")]
    ArenaOpeningHours,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::arena_opening_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArenaOpeningHours.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
