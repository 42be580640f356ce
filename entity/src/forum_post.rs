use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: Option<i32>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rink_user::Entity",
        from = "Column::AuthorId",
        to = "super::rink_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    RinkUser,
    #[sea_orm(has_many = "super::forum_reply::Entity")]
    ForumReply,
    #[sea_orm(has_many = "super::forum_vote::Entity")]
    ForumVote,
}

impl Related<super::rink_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkUser.def()
    }
}

impl Related<super::forum_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumReply.def()
    }
}

impl Related<super::forum_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumVote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
