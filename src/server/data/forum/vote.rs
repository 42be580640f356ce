//! Forum votes.
//!
//! A voter is `user:<id>` for members or `guest:<key>` for anonymous sessions. Each voter has at
//! most one vote per post and per reply, enforced by unique indexes on `(voter, post_id)` and
//! `(voter, reply_id)`.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect,
};

/// The post or reply a vote applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteTarget {
    Post(i32),
    Reply(i32),
}

impl VoteTarget {
    fn column(&self) -> entity::forum_vote::Column {
        match self {
            Self::Post(_) => entity::forum_vote::Column::PostId,
            Self::Reply(_) => entity::forum_vote::Column::ReplyId,
        }
    }

    fn id(&self) -> i32 {
        match self {
            Self::Post(id) | Self::Reply(id) => *id,
        }
    }
}

/// Up and down vote counts of one target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VoteTally {
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

pub struct VoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VoteRepository<'a, C> {
    /// Creates a new instance of [`VoteRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The voter's existing vote on a target
    pub async fn get(
        &self,
        voter: &str,
        target: VoteTarget,
    ) -> Result<Option<entity::forum_vote::Model>, DbErr> {
        entity::prelude::ForumVote::find()
            .filter(entity::forum_vote::Column::Voter.eq(voter))
            .filter(target.column().eq(target.id()))
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        voter: &str,
        user_id: Option<i32>,
        target: VoteTarget,
        is_upvote: bool,
    ) -> Result<entity::forum_vote::Model, DbErr> {
        let (post_id, reply_id) = match target {
            VoteTarget::Post(id) => (Some(id), None),
            VoteTarget::Reply(id) => (None, Some(id)),
        };

        let vote = entity::forum_vote::ActiveModel {
            voter: ActiveValue::Set(voter.to_string()),
            user_id: ActiveValue::Set(user_id),
            post_id: ActiveValue::Set(post_id),
            reply_id: ActiveValue::Set(reply_id),
            is_upvote: ActiveValue::Set(is_upvote),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        vote.insert(self.db).await
    }

    pub async fn set_direction(
        &self,
        vote: entity::forum_vote::Model,
        is_upvote: bool,
    ) -> Result<entity::forum_vote::Model, DbErr> {
        let mut vote_am = vote.into_active_model();
        vote_am.is_upvote = ActiveValue::Set(is_upvote);

        vote_am.update(self.db).await
    }

    pub async fn delete(&self, vote_id: i32) -> Result<(), DbErr> {
        entity::prelude::ForumVote::delete_by_id(vote_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Tally of a single target
    pub async fn tally(&self, target: VoteTarget) -> Result<VoteTally, DbErr> {
        let tallies = self.tallies(target.column(), vec![target.id()]).await?;

        Ok(tallies.get(&target.id()).copied().unwrap_or_default())
    }

    /// Tallies keyed by post ID, posts without votes are absent
    pub async fn tallies_for_posts(
        &self,
        post_ids: Vec<i32>,
    ) -> Result<HashMap<i32, VoteTally>, DbErr> {
        self.tallies(entity::forum_vote::Column::PostId, post_ids)
            .await
    }

    /// Tallies keyed by reply ID, replies without votes are absent
    pub async fn tallies_for_replies(
        &self,
        reply_ids: Vec<i32>,
    ) -> Result<HashMap<i32, VoteTally>, DbErr> {
        self.tallies(entity::forum_vote::Column::ReplyId, reply_ids)
            .await
    }

    /// The voter's direction on each of the given replies
    pub async fn directions_for_replies(
        &self,
        voter: &str,
        reply_ids: Vec<i32>,
    ) -> Result<HashMap<i32, bool>, DbErr> {
        if reply_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, bool)> = entity::prelude::ForumVote::find()
            .select_only()
            .column(entity::forum_vote::Column::ReplyId)
            .column(entity::forum_vote::Column::IsUpvote)
            .filter(entity::forum_vote::Column::Voter.eq(voter))
            .filter(entity::forum_vote::Column::ReplyId.is_in(reply_ids))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    async fn tallies(
        &self,
        column: entity::forum_vote::Column,
        ids: Vec<i32>,
    ) -> Result<HashMap<i32, VoteTally>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, bool, i64)> = entity::prelude::ForumVote::find()
            .select_only()
            .column(column)
            .column(entity::forum_vote::Column::IsUpvote)
            .column_as(entity::forum_vote::Column::Id.count(), "count")
            .filter(column.is_in(ids))
            .group_by(column)
            .group_by(entity::forum_vote::Column::IsUpvote)
            .into_tuple()
            .all(self.db)
            .await?;

        let mut tallies: HashMap<i32, VoteTally> = HashMap::new();
        for (id, is_upvote, count) in rows {
            let tally = tallies.entry(id).or_default();
            if is_upvote {
                tally.upvotes = count.max(0) as u64;
            } else {
                tally.downvotes = count.max(0) as u64;
            }
        }

        Ok(tallies)
    }
}
