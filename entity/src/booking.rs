use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{Activity, BookingStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub arena_id: Uuid,
    pub user_id: i32,
    pub date: Date,
    pub start_hour: i32,
    pub booked_at: DateTime,
    pub status: BookingStatus,
    pub activity: Option<Activity>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::arena::Entity",
        from = "Column::ArenaId",
        to = "super::arena::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Arena,
    #[sea_orm(
        belongs_to = "super::rink_user::Entity",
        from = "Column::UserId",
        to = "super::rink_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RinkUser,
}

impl Related<super::arena::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Arena.def()
    }
}

impl Related<super::rink_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
