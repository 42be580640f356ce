use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

pub struct ReplyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReplyRepository<'a, C> {
    /// Creates a new instance of [`ReplyRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        post_id: i32,
        author_id: i32,
        content: String,
    ) -> Result<entity::forum_reply::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let reply = entity::forum_reply::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            author_id: ActiveValue::Set(author_id),
            content: ActiveValue::Set(content),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        reply.insert(self.db).await
    }

    pub async fn get(&self, reply_id: i32) -> Result<Option<entity::forum_reply::Model>, DbErr> {
        entity::prelude::ForumReply::find_by_id(reply_id)
            .one(self.db)
            .await
    }

    /// Replies of a post, oldest first
    pub async fn get_by_post(
        &self,
        post_id: i32,
    ) -> Result<Vec<entity::forum_reply::Model>, DbErr> {
        entity::prelude::ForumReply::find()
            .filter(entity::forum_reply::Column::PostId.eq(post_id))
            .order_by_asc(entity::forum_reply::Column::CreatedAt)
            .order_by_asc(entity::forum_reply::Column::Id)
            .all(self.db)
            .await
    }

    /// Reply counts keyed by post ID, posts without replies are absent
    pub async fn count_for_posts(&self, post_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::ForumReply::find()
            .select_only()
            .column(entity::forum_reply::Column::PostId)
            .column_as(entity::forum_reply::Column::Id.count(), "count")
            .filter(entity::forum_reply::Column::PostId.is_in(post_ids))
            .group_by(entity::forum_reply::Column::PostId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(post_id, count)| (post_id, count.max(0) as u64))
            .collect())
    }
}
