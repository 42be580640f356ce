use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ReplyDto {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub upvotes: u64,
    pub downvotes: u64,
    /// The requesting voter's vote, `true` for up
    pub user_vote: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostDto {
    pub id: i32,
    /// `None` once the author's account is deleted
    pub author: Option<String>,
    pub title: String,
    pub content: String,
    pub thumbnail_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub upvotes: u64,
    pub downvotes: u64,
    pub user_vote: Option<bool>,
    pub reply_count: u64,
    pub replies: Vec<ReplyDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostSummaryDto {
    pub id: i32,
    pub author: Option<String>,
    pub title: String,
    /// At most 120 characters of the content
    pub excerpt: String,
    pub thumbnail_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub upvotes: u64,
    pub downvotes: u64,
    pub score: i64,
    pub reply_count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePostDto {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateReplyDto {
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VoteDto {
    /// `post` or `reply`
    pub target_type: String,
    pub target_id: i32,
    pub is_upvote: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct VoteTallyDto {
    pub upvotes: u64,
    pub downvotes: u64,
}
