//! Error types for the rink server.
//!
//! Each domain (accounts, arenas, bookings, events, forum) has its own error enum that maps to
//! a client-facing HTTP response. The crate-level [`Error`] aggregates them together with
//! library errors so handlers can use `?` throughout. Anything without a specific mapping is
//! logged and reported as a 500 without leaking details.

pub mod arena;
pub mod auth;
pub mod booking;
pub mod config;
pub mod event;
pub mod forum;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        arena::ArenaError, auth::AuthError, booking::BookingError, config::ConfigError,
        event::EventError, forum::ForumError, validation::ValidationError,
    },
};

/// Main error type for the rink server.
///
/// Uses `thiserror`'s `#[from]` so domain and library errors convert with `?`. The
/// `IntoResponse` implementation delegates to the domain error's own mapping and falls back to
/// [`InternalServerError`] for everything else.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error(transparent)]
    ArenaError(#[from] ArenaError),
    #[error(transparent)]
    BookingError(#[from] BookingError),
    #[error(transparent)]
    EventError(#[from] EventError),
    #[error(transparent)]
    ForumError(#[from] ForumError),
    /// Submitted form fields failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug or broken invariant.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error while binding or serving the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ArenaError(err) => err.into_response(),
            Self::BookingError(err) => err.into_response(),
            Self::EventError(err) => err.into_response(),
            Self::ForumError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Build a JSON `{"error": message}` response with the given status.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns a generic message so internal details never reach clients.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
