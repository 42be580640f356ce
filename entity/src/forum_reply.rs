use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_reply")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_id: i32,
    pub author_id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::forum_post::Entity",
        from = "Column::PostId",
        to = "super::forum_post::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ForumPost,
    #[sea_orm(
        belongs_to = "super::rink_user::Entity",
        from = "Column::AuthorId",
        to = "super::rink_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RinkUser,
    #[sea_orm(has_many = "super::forum_vote::Entity")]
    ForumVote,
}

impl Related<super::forum_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumPost.def()
    }
}

impl Related<super::rink_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkUser.def()
    }
}

impl Related<super::forum_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumVote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
