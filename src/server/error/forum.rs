use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ForumError {
    #[error("Forum post {0} not found")]
    PostNotFound(i32),
    #[error("Forum reply {0} not found")]
    ReplyNotFound(i32),
    #[error("Vote submitted for unknown target type {0:?}")]
    InvalidTargetType(String),
}

impl IntoResponse for ForumError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::PostNotFound(_) => error_response(StatusCode::NOT_FOUND, "Post not found."),
            Self::ReplyNotFound(_) => error_response(StatusCode::NOT_FOUND, "Reply not found."),
            Self::InvalidTargetType(_) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid target type.")
            }
        }
    }
}
