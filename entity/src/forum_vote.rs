use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "forum_vote")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `user:<id>` for members, `guest:<key>` for anonymous session voters
    pub voter: String,
    pub user_id: Option<i32>,
    pub post_id: Option<i32>,
    pub reply_id: Option<i32>,
    pub is_upvote: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rink_user::Entity",
        from = "Column::UserId",
        to = "super::rink_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RinkUser,
    #[sea_orm(
        belongs_to = "super::forum_post::Entity",
        from = "Column::PostId",
        to = "super::forum_post::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ForumPost,
    #[sea_orm(
        belongs_to = "super::forum_reply::Entity",
        from = "Column::ReplyId",
        to = "super::forum_reply::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ForumReply,
}

impl Related<super::rink_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RinkUser.def()
    }
}

impl Related<super::forum_post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumPost.def()
    }
}

impl Related<super::forum_reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ForumReply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
