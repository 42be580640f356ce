//! Helpers shared by the controller integration tests.

use axum::{
    body::to_bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Days, NaiveDate};
use rink::server::{
    error::Error,
    model::{app::AppState, session::user::SessionUserId},
    util::time::local_today,
};
use rink_test_utils::TestContext;

pub trait TestContextExt {
    /// [`AppState`] over the test database with the default local offset
    fn app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn app_state(&self) -> AppState {
        self.into_app_state()
    }
}

/// Store `user_id` in the test session as if the user had logged in
pub async fn log_in(test: &TestContext, user_id: i32) {
    SessionUserId::insert(&test.session, user_id).await.unwrap();
}

/// Local date `days` after today
pub fn days_from_today(state: &AppState, days: u64) -> NaiveDate {
    local_today(state.utc_offset) + Days::new(days)
}

pub fn days_before_today(state: &AppState, days: u64) -> NaiveDate {
    local_today(state.utc_offset) - Days::new(days)
}

/// Turn a handler result into its HTTP response, success or error
pub fn into_response<T: IntoResponse>(result: Result<T, Error>) -> Response {
    match result {
        Ok(resp) => resp.into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn status<T: IntoResponse>(result: Result<T, Error>) -> StatusCode {
    into_response(result).status()
}

pub async fn json_body(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
