use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Login failed for username {0:?}")]
    InvalidCredentials(String),
    #[error("User ID {0:?} attempted an admin-only action")]
    PermissionDenied(i32),
    #[error("Registration attempted with passwords that do not match")]
    PasswordMismatch,
    #[error("Registration attempted with taken username {0:?}")]
    UsernameTaken(String),
}

impl AuthError {
    fn authentication_required() -> Response {
        error_response(StatusCode::UNAUTHORIZED, "Authentication required.")
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                Self::authentication_required()
            }
            Self::InvalidCredentials(_) => error_response(
                StatusCode::UNAUTHORIZED,
                "Login failed, please check your username or password.",
            ),
            Self::PermissionDenied(_) => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.",
            ),
            Self::PasswordMismatch => {
                error_response(StatusCode::BAD_REQUEST, "Passwords do not match.")
            }
            Self::UsernameTaken(_) => {
                error_response(StatusCode::BAD_REQUEST, "Username already exists.")
            }
        }
    }
}
