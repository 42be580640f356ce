use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn forum(&self) -> ForumFixtures<'_> {
        ForumFixtures { context: self }
    }
}

pub struct ForumFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> ForumFixtures<'a> {
    pub async fn insert_post(
        &self,
        author_id: i32,
        title: &str,
    ) -> Result<entity::forum_post::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::ForumPost::insert(entity::forum_post::ActiveModel {
                author_id: ActiveValue::Set(Some(author_id)),
                title: ActiveValue::Set(title.to_string()),
                content: ActiveValue::Set(format!("{} content", title)),
                thumbnail_url: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_reply(
        &self,
        post_id: i32,
        author_id: i32,
        content: &str,
    ) -> Result<entity::forum_reply::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::ForumReply::insert(entity::forum_reply::ActiveModel {
                post_id: ActiveValue::Set(post_id),
                author_id: ActiveValue::Set(author_id),
                content: ActiveValue::Set(content.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert a vote on a post cast by `voter` (`user:<id>` or `guest:<key>`).
    pub async fn insert_post_vote(
        &self,
        voter: &str,
        post_id: i32,
        is_upvote: bool,
    ) -> Result<entity::forum_vote::Model, TestError> {
        Ok(
            entity::prelude::ForumVote::insert(entity::forum_vote::ActiveModel {
                voter: ActiveValue::Set(voter.to_string()),
                user_id: ActiveValue::Set(None),
                post_id: ActiveValue::Set(Some(post_id)),
                reply_id: ActiveValue::Set(None),
                is_upvote: ActiveValue::Set(is_upvote),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
