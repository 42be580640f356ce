use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Event {0:?} not found or inactive")]
    NotFound(String),
    #[error("Event ID {0} not found")]
    IdNotFound(i32),
    #[error("Attempted to register for past event {0:?}")]
    PastEvent(String),
    #[error("User ID {user_id} is already registered for event {slug:?}")]
    AlreadyRegistered { slug: String, user_id: i32 },
    #[error("Event {0:?} is fully booked")]
    EventFull(String),
    #[error("User ID {user_id} is not registered for event {slug:?}")]
    NotRegistered { slug: String, user_id: i32 },
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) | Self::IdNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Event not found.")
            }
            Self::PastEvent(_) => {
                error_response(StatusCode::BAD_REQUEST, "Cannot register for past events.")
            }
            Self::AlreadyRegistered { .. } => error_response(
                StatusCode::BAD_REQUEST,
                "You are already registered for this event.",
            ),
            Self::EventFull(_) => {
                error_response(StatusCode::CONFLICT, "Sorry, this event is fully booked.")
            }
            Self::NotRegistered { .. } => error_response(
                StatusCode::NOT_FOUND,
                "You were not registered for this event.",
            ),
        }
    }
}
