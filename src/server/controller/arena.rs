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
        api::{ErrorDto, StatusDto, ValidationErrorDto},
        arena::{ArenaDto, ArenaFormDto, AvailabilityDto},
    },
    server::{
        controller::util::get_user::{get_optional_user, require_admin},
        error::Error,
        model::app::AppState,
        service::{
            arena::ArenaService,
            availability::{parse_date_param, AvailabilityService},
        },
    },
};

pub static ARENA_TAG: &str = "arena";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlotsQuery {
    /// Date to show as `YYYY-MM-DD`
    pub date: Option<String>,
}

/// List all arenas with their opening hours
#[utoipa::path(
    get,
    path = "/api/arenas",
    tag = ARENA_TAG,
    responses(
        (status = 200, description = "Arenas ordered by name", body = Vec<ArenaDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_arenas(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let arenas = ArenaService::new(&state.db).list_arenas().await?;

    Ok((StatusCode::OK, Json(arenas)))
}

/// Get one arena with its opening hours
#[utoipa::path(
    get,
    path = "/api/arenas/{arena_id}",
    tag = ARENA_TAG,
    params(("arena_id" = Uuid, Path, description = "Arena ID")),
    responses(
        (status = 200, description = "Arena found", body = ArenaDto),
        (status = 404, description = "Arena not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_arena(
    State(state): State<AppState>,
    Path(arena_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let arena = ArenaService::new(&state.db).get_arena(arena_id).await?;

    Ok((StatusCode::OK, Json(arena)))
}

/// Get the hourly slots of an arena on a date
///
/// Logged in users see which booked slots are theirs.
#[utoipa::path(
    get,
    path = "/api/arenas/{arena_id}/slots",
    tag = ARENA_TAG,
    params(("arena_id" = Uuid, Path, description = "Arena ID"), SlotsQuery),
    responses(
        (status = 200, description = "Slots for the date", body = AvailabilityDto),
        (status = 400, description = "Missing or malformed date", body = ErrorDto),
        (status = 404, description = "Arena not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_slots(
    State(state): State<AppState>,
    session: Session,
    Path(arena_id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, Error> {
    let date = parse_date_param(query.date.as_deref())?;
    let user = get_optional_user(&state, &session).await?;

    let availability = AvailabilityService::new(&state.db, state.utc_offset)
        .get_slots(arena_id, date, user.map(|u| u.id))
        .await?;

    Ok((StatusCode::OK, Json(availability)))
}

/// Create an arena with its weekly opening hours
#[utoipa::path(
    post,
    path = "/api/admin/arenas",
    tag = ARENA_TAG,
    request_body = ArenaFormDto,
    responses(
        (status = 201, description = "Arena created", body = ArenaDto),
        (status = 400, description = "Invalid form fields", body = ValidationErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_create_arena(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ArenaFormDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let arena = ArenaService::new(&state.db).create_arena(form).await?;

    Ok((StatusCode::CREATED, Json(arena)))
}

/// Replace an arena's fields and weekly opening hours
#[utoipa::path(
    put,
    path = "/api/admin/arenas/{arena_id}",
    tag = ARENA_TAG,
    params(("arena_id" = Uuid, Path, description = "Arena ID")),
    request_body = ArenaFormDto,
    responses(
        (status = 200, description = "Arena updated", body = ArenaDto),
        (status = 400, description = "Invalid form fields", body = ValidationErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Arena not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_update_arena(
    State(state): State<AppState>,
    session: Session,
    Path(arena_id): Path<Uuid>,
    Json(form): Json<ArenaFormDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    let arena = ArenaService::new(&state.db)
        .update_arena(arena_id, form)
        .await?;

    Ok((StatusCode::OK, Json(arena)))
}

/// Delete an arena together with its opening hours and bookings
#[utoipa::path(
    delete,
    path = "/api/admin/arenas/{arena_id}",
    tag = ARENA_TAG,
    params(("arena_id" = Uuid, Path, description = "Arena ID")),
    responses(
        (status = 200, description = "Arena deleted", body = StatusDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Arena not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_delete_arena(
    State(state): State<AppState>,
    session: Session,
    Path(arena_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&state, &session).await?;

    ArenaService::new(&state.db).delete_arena(arena_id).await?;

    Ok((StatusCode::OK, Json(StatusDto::success())))
}
