use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, StatusDto, ValidationErrorDto},
        booking::ActivityDto,
        event::{EventDetailDto, EventDto, EventFormDto, EventLevelDto, MyEventsDto},
    },
    server::{
        controller::util::{
            get_user::{get_optional_user, get_user_from_session, require_admin},
            hx::{hx_trigger, CLOSE_MODAL_EVENT},
        },
        error::Error,
        model::app::AppState,
        service::event::EventService,
    },
};

pub static EVENT_TAG: &str = "event";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    pub category: Option<ActivityDto>,
    pub level: Option<EventLevelDto>,
}

/// List upcoming events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(EventListQuery),
    responses(
        (status = 200, description = "Upcoming active events by date and start time", body = Vec<EventDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, Error> {
    let events = EventService::new(&state.db, state.utc_offset)
        .list_events(query.category, query.level)
        .await?;

    Ok((StatusCode::OK, Json(events)))
}

/// List the logged in user's registrations split into upcoming and past
#[utoipa::path(
    get,
    path = "/api/events/mine",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "Registrations of the user", body = MyEventsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_events(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let events = EventService::new(&state.db, state.utc_offset)
        .my_events(user.id)
        .await?;

    Ok((StatusCode::OK, Json(events)))
}

/// Get an active event with related events of the same category
#[utoipa::path(
    get,
    path = "/api/events/{slug}",
    tag = EVENT_TAG,
    params(("slug" = String, Path, description = "Event slug")),
    responses(
        (status = 200, description = "Event found", body = EventDetailDto),
        (status = 404, description = "No active event with the slug", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_optional_user(&state, &session).await?;

    let event = EventService::new(&state.db, state.utc_offset)
        .get_event(&slug, user.map(|u| u.id))
        .await?;

    Ok((StatusCode::OK, Json(event)))
}

/// Register the logged in user for an event
///
/// Responds with an `HX-Trigger: closeModal` header.
#[utoipa::path(
    post,
    path = "/api/events/{slug}/register",
    tag = EVENT_TAG,
    params(("slug" = String, Path, description = "Event slug")),
    responses(
        (status = 201, description = "Registered", body = EventDetailDto),
        (status = 400, description = "Event is in the past or already registered", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No active event with the slug", body = ErrorDto),
        (status = 409, description = "Event is full", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let event = EventService::new(&state.db, state.utc_offset)
        .register(&slug, user.id)
        .await?;

    Ok((StatusCode::CREATED, hx_trigger(CLOSE_MODAL_EVENT), Json(event)))
}

/// Cancel the logged in user's registration for an event
#[utoipa::path(
    post,
    path = "/api/events/{slug}/cancel",
    tag = EVENT_TAG,
    params(("slug" = String, Path, description = "Event slug")),
    responses(
        (status = 200, description = "Registration cancelled", body = StatusDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No active event with the slug or not registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_registration(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    EventService::new(&state.db, state.utc_offset)
        .cancel_registration(&slug, user.id)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success())))
}

/// Create an event, deriving a unique slug from its name
#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = EVENT_TAG,
    request_body = EventFormDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid form fields", body = ValidationErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_create_event(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<EventFormDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let event = EventService::new(&state.db, state.utc_offset)
        .create_event(form)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Delete an event and its registrations
#[utoipa::path(
    delete,
    path = "/api/admin/events/{event_id}",
    tag = EVENT_TAG,
    params(("event_id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = StatusDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_delete_event(
    State(state): State<AppState>,
    session: Session,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    EventService::new(&state.db, state.utc_offset)
        .delete_event(event_id)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success())))
}
