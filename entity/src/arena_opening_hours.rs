use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "arena_opening_hours")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub arena_id: Uuid,
    /// Weekday, 0 = Monday through 6 = Sunday
    pub day: i32,
    pub open_time: Option<Time>,
    pub close_time: Option<Time>,
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
}

impl Related<super::arena::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Arena.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
