use axum::{extract::State, http::StatusCode, Json};
use rink::{
    model::user::{LoginDto, RegisterDto},
    server::{
        controller::auth::{get_user, login, logout, register},
        model::session::user::SessionUserId,
    },
};

use super::*;

fn register_form(username: &str, password1: &str, password2: &str) -> Json<RegisterDto> {
    Json(RegisterDto {
        username: username.to_string(),
        password1: password1.to_string(),
        password2: password2.to_string(),
    })
}

/// Expect 201 created for a valid registration without logging the user in
#[tokio::test]
async fn register_creates_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = register(
        State(test.app_state()),
        register_form("skater_1", "frozen-lake-42", "frozen-lake-42"),
    )
    .await;

    let resp = into_response(result);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["username"], "skater_1");
    assert_eq!(body["is_admin"], false);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 400 bad request when the passwords differ
#[tokio::test]
async fn register_rejects_password_mismatch() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = register(
        State(test.app_state()),
        register_form("skater_1", "frozen-lake-42", "frozen-lake-43"),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 400 bad request for a username that is already taken
#[tokio::test]
async fn register_rejects_taken_username() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_user("alice").await?;

    let result = register(
        State(test.app_state()),
        register_form("alice", "frozen-lake-42", "frozen-lake-42"),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 success and the user ID in session after logging in
#[tokio::test]
async fn login_stores_user_in_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("alice").await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "alice".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::OK);
    assert_eq!(
        SessionUserId::get(&test.session).await.unwrap(),
        Some(user.id)
    );

    Ok(())
}

/// Expect 401 unauthorized for a wrong password
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    test.user().insert_user("alice").await?;

    let result = login(
        State(test.app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "alice".to_string(),
            password: "not-the-password".to_string(),
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 200 success after logout with a user ID in session, and the session cleared
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    log_in(&test, 1).await;

    let result = logout(test.session.clone()).await;

    assert_eq!(status(result), StatusCode::OK);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}

/// Expect 200 success after logout even without session data
///
/// Clearing an empty session fails, so the handler only clears when a user is present.
#[tokio::test]
async fn logout_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = logout(test.session).await;

    assert_eq!(status(result), StatusCode::OK);

    Ok(())
}

/// Expect 200 success with the logged in user
#[tokio::test]
async fn get_user_returns_session_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;

    let resp = into_response(get_user(State(test.app_state()), test.session.clone()).await);

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["id"], user.id);

    Ok(())
}

/// Expect 401 unauthorized without a user in session
#[tokio::test]
async fn get_user_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 401 unauthorized when the session user no longer exists
#[tokio::test]
async fn get_user_with_deleted_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    log_in(&test, 42).await;

    let result = get_user(State(test.app_state()), test.session.clone()).await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_none());

    Ok(())
}
