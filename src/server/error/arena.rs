use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Arena {0} not found")]
    NotFound(Uuid),
}

impl IntoResponse for ArenaError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Arena not found."),
        }
    }
}
