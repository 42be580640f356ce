use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        forum::{
            CreatePostDto, CreateReplyDto, PostDto, PostSummaryDto, ReplyDto, VoteDto,
            VoteTallyDto,
        },
    },
    server::{
        controller::util::get_user::{get_optional_user, get_user_from_session},
        error::Error,
        model::{app::AppState, session::voter::SessionVoterKey},
        service::forum::{ForumService, Voter, TOP_POSTS_LIMIT},
    },
};

pub static FORUM_TAG: &str = "forum";

/// Highest scoring posts for the home page
#[utoipa::path(
    get,
    path = "/api/forum/posts/top",
    tag = FORUM_TAG,
    responses(
        (status = 200, description = "Top posts by score", body = Vec<PostSummaryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn top_posts(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let posts = ForumService::new(&state.db)
        .top_posts(TOP_POSTS_LIMIT)
        .await?;

    Ok((StatusCode::OK, Json(posts)))
}

/// Create a forum post as the logged in user
#[utoipa::path(
    post,
    path = "/api/forum/posts",
    tag = FORUM_TAG,
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid form fields", body = ValidationErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_post(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CreatePostDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let post = ForumService::new(&state.db)
        .create_post(user.id, form)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get a post with its replies and vote tallies
///
/// `user_vote` fields reflect the logged in user, or the guest voter of this session.
#[utoipa::path(
    get,
    path = "/api/forum/posts/{post_id}",
    tag = FORUM_TAG,
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_post(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let voter = match get_optional_user(&state, &session).await? {
        Some(user) => Some(Voter::user(user.id)),
        None => SessionVoterKey::get(&session)
            .await?
            .map(|key| Voter::guest(&key)),
    };

    let post = ForumService::new(&state.db)
        .get_post(post_id, voter.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(post)))
}

/// Reply to a post as the logged in user
#[utoipa::path(
    post,
    path = "/api/forum/posts/{post_id}/replies",
    tag = FORUM_TAG,
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = CreateReplyDto,
    responses(
        (status = 201, description = "Reply created", body = ReplyDto),
        (status = 400, description = "Empty reply", body = ValidationErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_reply(
    State(state): State<AppState>,
    session: Session,
    Path(post_id): Path<i32>,
    Json(form): Json<CreateReplyDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let reply = ForumService::new(&state.db)
        .add_reply(post_id, user.id, form)
        .await?;

    Ok((StatusCode::CREATED, Json(reply)))
}

/// Toggle an up or down vote on a post or reply
///
/// Guests vote with a key stored in their session, created on the first vote.
#[utoipa::path(
    post,
    path = "/api/forum/votes",
    tag = FORUM_TAG,
    request_body = VoteDto,
    responses(
        (status = 200, description = "Tally of the target after the vote", body = VoteTallyDto),
        (status = 400, description = "Unknown target type", body = ErrorDto),
        (status = 404, description = "Target not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_vote(
    State(state): State<AppState>,
    session: Session,
    Json(vote): Json<VoteDto>,
) -> Result<impl IntoResponse, Error> {
    let voter = match get_optional_user(&state, &session).await? {
        Some(user) => Voter::user(user.id),
        None => Voter::guest(&SessionVoterKey::get_or_create(&session).await?),
    };

    let tally = ForumService::new(&state.db).toggle_vote(&voter, vote).await?;

    Ok((StatusCode::OK, Json(tally)))
}
