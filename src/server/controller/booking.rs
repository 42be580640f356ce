use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        arena::AvailabilityDto,
        booking::{BookingDto, BookingStatusDto, CancelBookingDto, CreateBookingDto},
    },
    server::{
        controller::util::{
            get_user::{get_user_from_session, require_admin},
            hx::{hx_trigger, BOOKING_CHANGED_EVENT},
        },
        data::booking::BookingFilter,
        error::{booking::BookingError, Error},
        model::app::AppState,
        service::{
            availability::parse_date_param,
            booking::{BookingRequest, BookingService},
        },
        util::time::parse_date,
    },
};

pub static BOOKING_TAG: &str = "booking";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CancelQuery {
    /// `arena` to also return the refreshed availability of the booking's date
    pub from: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminBookingQuery {
    pub arena_id: Option<Uuid>,
    pub status: Option<BookingStatusDto>,
    /// Date as `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Book an hourly slot of an arena
///
/// Responds with the arena's availability on the booked date and an `HX-Trigger:
/// bookingChanged` header.
#[utoipa::path(
    post,
    path = "/api/arenas/{arena_id}/bookings",
    tag = BOOKING_TAG,
    params(("arena_id" = Uuid, Path, description = "Arena ID")),
    request_body = CreateBookingDto,
    responses(
        (status = 200, description = "Slot booked", body = AvailabilityDto),
        (status = 400, description = "Past date, invalid hour, closed hour or started slot", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Arena not found", body = ErrorDto),
        (status = 409, description = "Slot already booked", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_booking(
    State(state): State<AppState>,
    session: Session,
    Path(arena_id): Path<Uuid>,
    Json(form): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let date = parse_date(&form.date).ok_or_else(|| BookingError::InvalidDate(form.date.clone()))?;

    let availability = BookingService::new(&state.db, state.utc_offset)
        .create_booking(BookingRequest {
            arena_id,
            user_id: user.id,
            date,
            hour: form.hour,
            activity: form.activity.map(Into::into),
        })
        .await?;

    Ok((
        StatusCode::OK,
        hx_trigger(BOOKING_CHANGED_EVENT),
        Json(availability),
    ))
}

/// List the logged in user's bookings, newest date first
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "Bookings of the user", body = Vec<BookingDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_user_bookings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let bookings = BookingService::new(&state.db, state.utc_offset)
        .list_user_bookings(user.id)
        .await?;

    Ok((StatusCode::OK, Json(bookings)))
}

/// Cancel one of the logged in user's bookings
///
/// Cancelling a booking that is already cancelled or completed changes nothing.
#[utoipa::path(
    post,
    path = "/api/bookings/{booking_id}/cancel",
    tag = BOOKING_TAG,
    params(("booking_id" = Uuid, Path, description = "Booking ID"), CancelQuery),
    responses(
        (status = 200, description = "Booking cancelled", body = CancelBookingDto),
        (status = 400, description = "Booking date is in the past", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Booking belongs to another user", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<Uuid>,
    Query(query): Query<CancelQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let include_availability = query.from.as_deref() == Some("arena");

    let cancelled = BookingService::new(&state.db, state.utc_offset)
        .cancel_booking(booking_id, user.id, include_availability)
        .await?;

    Ok((
        StatusCode::OK,
        hx_trigger(BOOKING_CHANGED_EVENT),
        Json(cancelled),
    ))
}

/// List all bookings with optional filters
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    tag = BOOKING_TAG,
    params(AdminBookingQuery),
    responses(
        (status = 200, description = "Matching bookings", body = Vec<BookingDto>),
        (status = 400, description = "Malformed date filter", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_list_bookings(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminBookingQuery>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let date = match query.date.as_deref() {
        Some(date) => Some(parse_date_param(Some(date))?),
        None => None,
    };

    let filter = BookingFilter {
        arena_id: query.arena_id,
        status: query.status.map(Into::into),
        date,
    };

    let bookings = BookingService::new(&state.db, state.utc_offset)
        .admin_list_bookings(filter)
        .await?;

    Ok((StatusCode::OK, Json(bookings)))
}

/// Delete a booking outright, freeing its slot
#[utoipa::path(
    delete,
    path = "/api/admin/bookings/{booking_id}",
    tag = BOOKING_TAG,
    params(("booking_id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = StatusDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Booking not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_delete_booking(
    State(state): State<AppState>,
    session: Session,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    BookingService::new(&state.db, state.utc_offset)
        .admin_delete_booking(booking_id)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success())))
}
