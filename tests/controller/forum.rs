use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rink::{
    model::forum::{CreatePostDto, CreateReplyDto, VoteDto},
    server::{
        controller::forum::{add_reply, create_post, get_post, top_posts, toggle_vote},
        model::session::voter::SessionVoterKey,
    },
};

use super::*;

fn vote(target_type: &str, target_id: i32, is_upvote: bool) -> Json<VoteDto> {
    Json(VoteDto {
        target_type: target_type.to_string(),
        target_id,
        is_upvote,
    })
}

/// Expect 201 created for a post by a logged in user
#[tokio::test]
async fn create_post_as_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;

    let resp = into_response(
        create_post(
            State(test.app_state()),
            test.session.clone(),
            Json(CreatePostDto {
                title: "Best skates for beginners?".to_string(),
                content: "Looking for recommendations.".to_string(),
                thumbnail_url: None,
            }),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["author"], "alice");
    assert_eq!(body["reply_count"], 0);

    Ok(())
}

/// Expect 401 unauthorized for guests creating posts
#[tokio::test]
async fn create_post_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;

    let result = create_post(
        State(test.app_state()),
        test.session.clone(),
        Json(CreatePostDto {
            title: "Hello".to_string(),
            content: "World".to_string(),
            thumbnail_url: None,
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 201 created for a reply and the reply listed on the post
#[tokio::test]
async fn add_reply_to_post() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let post = test.forum().insert_post(user.id, "Rink etiquette").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();

    let created = add_reply(
        State(state.clone()),
        test.session.clone(),
        Path(post.id),
        Json(CreateReplyDto {
            content: "Skate counter clockwise.".to_string(),
        }),
    )
    .await;
    assert_eq!(status(created), StatusCode::CREATED);

    let resp = into_response(get_post(State(state), test.session.clone(), Path(post.id)).await);
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["reply_count"], 1);
    assert_eq!(body["replies"][0]["content"], "Skate counter clockwise.");

    Ok(())
}

/// Expect 404 not found when replying to an unknown post
#[tokio::test]
async fn add_reply_to_missing_post() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;

    let result = add_reply(
        State(test.app_state()),
        test.session.clone(),
        Path(99),
        Json(CreateReplyDto {
            content: "Anyone?".to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect a guest vote to toggle on repeat and be remembered by the session
#[tokio::test]
async fn toggle_vote_as_guest() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let post = test.forum().insert_post(user.id, "Rink etiquette").await?;
    let state = test.app_state();

    let resp = into_response(
        toggle_vote(State(state.clone()), test.session.clone(), vote("post", post.id, true)).await,
    );
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["upvotes"], 1);
    assert!(SessionVoterKey::get(&test.session).await.unwrap().is_some());

    let post_resp =
        into_response(get_post(State(state.clone()), test.session.clone(), Path(post.id)).await);
    assert_eq!(json_body(post_resp).await["user_vote"], true);

    let resp = into_response(
        toggle_vote(State(state), test.session.clone(), vote("post", post.id, true)).await,
    );
    assert_eq!(json_body(resp).await["upvotes"], 0);

    Ok(())
}

/// Expect a logged in user's vote to flip direction
#[tokio::test]
async fn toggle_vote_flips_direction() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let post = test.forum().insert_post(user.id, "Rink etiquette").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();

    toggle_vote(State(state.clone()), test.session.clone(), vote("post", post.id, true))
        .await
        .unwrap();
    let resp = into_response(
        toggle_vote(State(state), test.session.clone(), vote("post", post.id, false)).await,
    );

    let body = json_body(resp).await;
    assert_eq!(body["upvotes"], 0);
    assert_eq!(body["downvotes"], 1);

    Ok(())
}

/// Expect 400 bad request for an unknown target type and 404 for a missing reply
#[tokio::test]
async fn toggle_vote_rejects_bad_targets() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let state = test.app_state();

    let invalid = toggle_vote(State(state.clone()), test.session.clone(), vote("thread", 1, true)).await;
    assert_eq!(status(invalid), StatusCode::BAD_REQUEST);

    let missing = toggle_vote(State(state), test.session.clone(), vote("reply", 1, true)).await;
    assert_eq!(status(missing), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect at most three posts ordered by score
#[tokio::test]
async fn top_posts_by_score() -> Result<(), TestError> {
    let test = TestBuilder::new().with_forum_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let quiet = test.forum().insert_post(user.id, "Quiet").await?;
    let popular = test.forum().insert_post(user.id, "Popular").await?;
    test.forum().insert_post(user.id, "Third").await?;
    test.forum().insert_post(user.id, "Fourth").await?;
    test.forum().insert_post_vote("guest:a", popular.id, true).await?;
    test.forum().insert_post_vote("guest:b", popular.id, true).await?;
    test.forum().insert_post_vote("guest:a", quiet.id, false).await?;

    let resp = into_response(top_posts(State(test.app_state())).await);

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
    assert_eq!(body[0]["title"], "Popular");
    assert_eq!(body[0]["score"], 2);

    Ok(())
}
