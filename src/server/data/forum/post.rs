use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
};

pub struct PostRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostRepository<'a, C> {
    /// Creates a new instance of [`PostRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        author_id: i32,
        title: String,
        content: String,
        thumbnail_url: Option<String>,
    ) -> Result<entity::forum_post::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let post = entity::forum_post::ActiveModel {
            author_id: ActiveValue::Set(Some(author_id)),
            title: ActiveValue::Set(title),
            content: ActiveValue::Set(content),
            thumbnail_url: ActiveValue::Set(thumbnail_url),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        post.insert(self.db).await
    }

    pub async fn get(&self, post_id: i32) -> Result<Option<entity::forum_post::Model>, DbErr> {
        entity::prelude::ForumPost::find_by_id(post_id)
            .one(self.db)
            .await
    }

    /// All posts, newest first
    pub async fn get_all(&self) -> Result<Vec<entity::forum_post::Model>, DbErr> {
        entity::prelude::ForumPost::find()
            .order_by_desc(entity::forum_post::Column::CreatedAt)
            .order_by_desc(entity::forum_post::Column::Id)
            .all(self.db)
            .await
    }
}
