//! Forum posts, replies and voting.

use std::{cmp::Reverse, collections::HashMap};

use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::forum::{
        CreatePostDto, CreateReplyDto, PostDto, PostSummaryDto, ReplyDto, VoteDto, VoteTallyDto,
    },
    server::{
        data::{
            forum::{PostRepository, ReplyRepository, VoteRepository, VoteTally, VoteTarget},
            user::UserRepository,
        },
        error::{forum::ForumError, validation::ValidationError, Error},
        model::db::{PostModel, ReplyModel},
        util::text::{excerpt, is_http_url, non_blank},
    },
};

const TITLE_MAX_LENGTH: usize = 200;
const EXCERPT_MAX_LENGTH: usize = 120;

/// Default number of posts returned by [`ForumService::top_posts`]
pub const TOP_POSTS_LIMIT: usize = 3;

/// Identity a vote is recorded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voter {
    key: String,
    user_id: Option<i32>,
}

impl Voter {
    pub fn user(user_id: i32) -> Self {
        Self {
            key: format!("user:{}", user_id),
            user_id: Some(user_id),
        }
    }

    /// Anonymous voter identified by a random key kept in the session
    pub fn guest(session_key: &str) -> Self {
        Self {
            key: format!("guest:{}", session_key),
            user_id: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

pub struct ForumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ForumService<'a> {
    /// Creates a new instance of [`ForumService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_post(&self, user_id: i32, form: CreatePostDto) -> Result<PostDto, Error> {
        let mut errors = ValidationError::new();

        let title = form.title.trim();
        if title.is_empty() {
            errors.add("title", "This field is required.");
        } else if title.chars().count() > TITLE_MAX_LENGTH {
            errors.add(
                "title",
                format!("Ensure this value has at most {TITLE_MAX_LENGTH} characters."),
            );
        }

        let content = form.content.trim();
        if content.is_empty() {
            errors.add("content", "This field is required.");
        }

        let thumbnail_url = non_blank(form.thumbnail_url.as_deref());
        if thumbnail_url.as_deref().is_some_and(|url| !is_http_url(url)) {
            errors.add("thumbnail_url", "Enter a valid URL.");
        }

        errors.into_result()?;

        let post = PostRepository::new(self.db)
            .create(
                user_id,
                title.to_string(),
                content.to_string(),
                thumbnail_url,
            )
            .await?;

        tracing::debug!("User ID {} created forum post ID {}", user_id, post.id);

        self.get_post(post.id, Some(&Voter::user(user_id))).await
    }

    /// Post with its replies oldest first and the voter's own votes
    pub async fn get_post(&self, post_id: i32, voter: Option<&Voter>) -> Result<PostDto, Error> {
        let Some(post) = PostRepository::new(self.db).get(post_id).await? else {
            return Err(ForumError::PostNotFound(post_id).into());
        };

        let replies = ReplyRepository::new(self.db).get_by_post(post_id).await?;
        let reply_ids: Vec<i32> = replies.iter().map(|r| r.id).collect();

        let vote_repo = VoteRepository::new(self.db);
        let post_tally = vote_repo.tally(VoteTarget::Post(post_id)).await?;
        let reply_tallies = vote_repo.tallies_for_replies(reply_ids.clone()).await?;

        let (post_vote, reply_votes) = match voter {
            Some(voter) => (
                vote_repo
                    .get(voter.key(), VoteTarget::Post(post_id))
                    .await?
                    .map(|v| v.is_upvote),
                vote_repo
                    .directions_for_replies(voter.key(), reply_ids)
                    .await?,
            ),
            None => (None, HashMap::new()),
        };

        let mut author_ids: Vec<i32> = replies.iter().map(|r| r.author_id).collect();
        author_ids.extend(post.author_id);
        let authors = self.usernames(author_ids).await?;

        let reply_count = replies.len() as u64;
        let replies = replies
            .into_iter()
            .map(|reply| {
                let tally = reply_tallies.get(&reply.id).copied().unwrap_or_default();
                let user_vote = reply_votes.get(&reply.id).copied();
                reply_dto(reply, &authors, tally, user_vote)
            })
            .collect();

        Ok(PostDto {
            id: post.id,
            author: post.author_id.and_then(|id| authors.get(&id).cloned()),
            title: post.title,
            content: post.content,
            thumbnail_url: post.thumbnail_url,
            created_at: post.created_at,
            upvotes: post_tally.upvotes,
            downvotes: post_tally.downvotes,
            user_vote: post_vote,
            reply_count,
            replies,
        })
    }

    pub async fn add_reply(
        &self,
        post_id: i32,
        user_id: i32,
        form: CreateReplyDto,
    ) -> Result<ReplyDto, Error> {
        let content = form.content.trim();
        if content.is_empty() {
            let mut errors = ValidationError::new();
            errors.add("content", "This field is required.");
            return Err(errors.into());
        }

        if PostRepository::new(self.db).get(post_id).await?.is_none() {
            return Err(ForumError::PostNotFound(post_id).into());
        }

        let reply = ReplyRepository::new(self.db)
            .create(post_id, user_id, content.to_string())
            .await?;

        let authors = self.usernames(vec![user_id]).await?;

        Ok(reply_dto(reply, &authors, VoteTally::default(), None))
    }

    /// Creates, removes or flips the voter's vote on a post or reply
    ///
    /// No existing vote creates one, a vote in the same direction is removed and a vote in the
    /// opposite direction is flipped.
    ///
    /// # Returns
    /// - `Ok(VoteTallyDto)` - Tally of the target after the change
    /// - `Err(Error::ForumError(ForumError::InvalidTargetType))` - Target type is not `post` or
    ///   `reply`
    /// - `Err(Error::ForumError)` - The target post or reply does not exist
    pub async fn toggle_vote(&self, voter: &Voter, vote: VoteDto) -> Result<VoteTallyDto, Error> {
        let target = match vote.target_type.as_str() {
            "post" => VoteTarget::Post(vote.target_id),
            "reply" => VoteTarget::Reply(vote.target_id),
            other => return Err(ForumError::InvalidTargetType(other.to_string()).into()),
        };

        let txn = self.db.begin().await?;

        match target {
            VoteTarget::Post(id) => {
                if PostRepository::new(&txn).get(id).await?.is_none() {
                    return Err(ForumError::PostNotFound(id).into());
                }
            }
            VoteTarget::Reply(id) => {
                if ReplyRepository::new(&txn).get(id).await?.is_none() {
                    return Err(ForumError::ReplyNotFound(id).into());
                }
            }
        }

        let vote_repo = VoteRepository::new(&txn);
        let Some(existing) = vote_repo.get(voter.key(), target).await? else {
            txn.commit().await?;
            return self.create_vote(voter, target, vote.is_upvote).await;
        };

        if existing.is_upvote == vote.is_upvote {
            vote_repo.delete(existing.id).await?;
        } else {
            vote_repo.set_direction(existing, vote.is_upvote).await?;
        }

        let tally = vote_repo.tally(target).await?;

        txn.commit().await?;

        Ok(tally_dto(tally))
    }

    /// Records the voter's first vote on `target`
    ///
    /// A concurrent first vote from the same voter (a double click) trips the unique
    /// `(voter, target)` index; that vote already counts, so the current tally is returned.
    async fn create_vote(
        &self,
        voter: &Voter,
        target: VoteTarget,
        is_upvote: bool,
    ) -> Result<VoteTallyDto, Error> {
        let vote_repo = VoteRepository::new(self.db);

        if let Err(err) = vote_repo
            .create(voter.key(), voter.user_id, target, is_upvote)
            .await
        {
            let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() else {
                return Err(err.into());
            };

            tracing::debug!(
                "Voter {} already voted on {:?}, keeping the existing vote",
                voter.key(),
                target
            );
        }

        Ok(tally_dto(vote_repo.tally(target).await?))
    }

    /// Highest scoring posts
    ///
    /// Ordered by score (upvotes minus downvotes), then upvotes, downvotes, newest first and
    /// highest ID, each descending.
    pub async fn top_posts(&self, limit: usize) -> Result<Vec<PostSummaryDto>, Error> {
        let posts = PostRepository::new(self.db).get_all().await?;
        let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();

        let tallies = VoteRepository::new(self.db)
            .tallies_for_posts(post_ids.clone())
            .await?;
        let reply_counts = ReplyRepository::new(self.db)
            .count_for_posts(post_ids)
            .await?;

        let mut ranked: Vec<(PostModel, VoteTally)> = posts
            .into_iter()
            .map(|post| {
                let tally = tallies.get(&post.id).copied().unwrap_or_default();
                (post, tally)
            })
            .collect();
        ranked.sort_by_key(|(post, tally)| {
            (
                Reverse(tally.score()),
                Reverse(tally.upvotes),
                Reverse(tally.downvotes),
                Reverse(post.created_at),
                Reverse(post.id),
            )
        });
        ranked.truncate(limit);

        let authors = self
            .usernames(ranked.iter().filter_map(|(p, _)| p.author_id).collect())
            .await?;

        Ok(ranked
            .into_iter()
            .map(|(post, tally)| PostSummaryDto {
                id: post.id,
                author: post.author_id.and_then(|id| authors.get(&id).cloned()),
                excerpt: excerpt(&post.content, EXCERPT_MAX_LENGTH),
                title: post.title,
                thumbnail_url: post.thumbnail_url,
                created_at: post.created_at,
                upvotes: tally.upvotes,
                downvotes: tally.downvotes,
                score: tally.score(),
                reply_count: reply_counts.get(&post.id).copied().unwrap_or(0),
            })
            .collect())
    }

    async fn usernames(&self, mut user_ids: Vec<i32>) -> Result<HashMap<i32, String>, Error> {
        user_ids.sort_unstable();
        user_ids.dedup();

        Ok(UserRepository::new(self.db)
            .get_many(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect())
    }
}

fn tally_dto(tally: VoteTally) -> VoteTallyDto {
    VoteTallyDto {
        upvotes: tally.upvotes,
        downvotes: tally.downvotes,
    }
}

fn reply_dto(
    reply: ReplyModel,
    authors: &HashMap<i32, String>,
    tally: VoteTally,
    user_vote: Option<bool>,
) -> ReplyDto {
    ReplyDto {
        id: reply.id,
        author: authors.get(&reply.author_id).cloned().unwrap_or_default(),
        content: reply.content,
        created_at: reply.created_at,
        upvotes: tally.upvotes,
        downvotes: tally.downvotes,
        user_vote,
    }
}
