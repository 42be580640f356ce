use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Availability requested without a date parameter")]
    DateRequired,
    #[error("Failed to parse date {0:?} as YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Attempted to book past date {0}")]
    PastDate(NaiveDate),
    #[error("Hour {0} is outside 0-23")]
    InvalidHour(i32),
    #[error("Arena is not open at {hour}:00 on {date}")]
    OutsideOpeningHours { date: NaiveDate, hour: i32 },
    #[error("Slot {hour}:00 on {date} has already started")]
    SlotStarted { date: NaiveDate, hour: i32 },
    #[error("Slot is already booked")]
    SlotUnavailable,
    #[error("Booking {0} not found")]
    NotFound(Uuid),
    #[error("User ID {user_id} attempted to cancel booking {booking_id} owned by another user")]
    NotOwner { booking_id: Uuid, user_id: i32 },
    #[error("Attempted to cancel booking {0} for a past date")]
    PastCancellation(Uuid),
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        match self {
            Self::NotOwner { .. } => tracing::warn!("{}", self),
            _ => tracing::debug!("{}", self),
        }

        match self {
            Self::DateRequired => {
                error_response(StatusCode::BAD_REQUEST, "Date parameter is required.")
            }
            Self::InvalidDate(_) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid date format (YYYY-MM-DD).")
            }
            Self::PastDate(_) => error_response(StatusCode::BAD_REQUEST, "Cannot book past dates."),
            Self::InvalidHour(_) => {
                error_response(StatusCode::BAD_REQUEST, "Hour must be between 0 and 23.")
            }
            Self::OutsideOpeningHours { .. } => error_response(
                StatusCode::BAD_REQUEST,
                "The arena is not open at the selected hour.",
            ),
            Self::SlotStarted { .. } => {
                error_response(StatusCode::BAD_REQUEST, "This slot has already started.")
            }
            Self::SlotUnavailable => {
                error_response(StatusCode::CONFLICT, "This slot is no longer available.")
            }
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Booking not found."),
            Self::NotOwner { .. } => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.",
            ),
            Self::PastCancellation(_) => {
                error_response(StatusCode::BAD_REQUEST, "Cannot cancel past bookings.")
            }
        }
    }
}
