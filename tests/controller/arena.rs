use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rink::{
    model::arena::{ArenaFormDto, OpeningHoursDto},
    server::controller::arena::{
        admin_create_arena, admin_delete_arena, admin_update_arena, get_arena, get_slots,
        list_arenas, SlotsQuery,
    },
};
use uuid::Uuid;

use super::*;

fn arena_form(name: &str) -> ArenaFormDto {
    ArenaFormDto {
        name: name.to_string(),
        description: "Olympic sized sheet".to_string(),
        capacity: 120,
        location: "1 Harbour Road".to_string(),
        img_url: None,
        opening_hours_text: None,
        google_maps_url: None,
        opening_hours: vec![OpeningHoursDto {
            day: 0,
            open_time: Some("09:00".to_string()),
            close_time: Some("17:00".to_string()),
        }],
    }
}

fn slots_query(date: Option<String>) -> Query<SlotsQuery> {
    Query(SlotsQuery { date })
}

/// Expect 200 success with arenas ordered by name
#[tokio::test]
async fn list_arenas_ordered_by_name() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().build().await?;
    test.arena().insert_arena("South Rink").await?;
    test.arena().insert_arena("North Rink").await?;

    let resp = into_response(list_arenas(State(test.app_state())).await);

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body[0]["name"], "North Rink");
    assert_eq!(body[1]["name"], "South Rink");
    assert_eq!(body[0]["opening_hours"].as_array().map(Vec::len), Some(7));

    Ok(())
}

/// Expect 404 not found for an unknown arena
#[tokio::test]
async fn get_arena_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().build().await?;

    let result = get_arena(State(test.app_state()), Path(Uuid::new_v4())).await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 200 success with one slot per opening hour for an anonymous visitor
#[tokio::test]
async fn get_slots_for_open_day() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);

    let result = get_slots(
        State(state),
        test.session.clone(),
        Path(arena.id),
        slots_query(Some(date.to_string())),
    )
    .await;

    let resp = into_response(result);
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["is_closed_today"], false);
    assert_eq!(body["is_bookable_date"], true);
    // Open 08:00 - 22:00
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(14));
    assert_eq!(body["slots"][0]["label"], "08:00 - 09:00");

    Ok(())
}

/// Expect 400 bad request when the date parameter is missing
#[tokio::test]
async fn get_slots_requires_date() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let arena = test.arena().insert_arena("North Rink").await?;

    let result = get_slots(
        State(test.app_state()),
        test.session.clone(),
        Path(arena.id),
        slots_query(None),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 400 bad request for a malformed date
#[tokio::test]
async fn get_slots_rejects_malformed_date() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let arena = test.arena().insert_arena("North Rink").await?;

    let result = get_slots(
        State(test.app_state()),
        test.session.clone(),
        Path(arena.id),
        slots_query(Some("18/10/2026".to_string())),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 201 created when an admin creates an arena, with closed days filled in
#[tokio::test]
async fn admin_create_arena_as_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().with_user_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    log_in(&test, admin.id).await;

    let result = admin_create_arena(
        State(test.app_state()),
        test.session.clone(),
        Json(arena_form("East Rink")),
    )
    .await;

    let resp = into_response(result);
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "East Rink");
    assert_eq!(body["opening_hours"][0]["open_time"], "09:00");
    assert!(body["opening_hours"][1]["open_time"].is_null());

    Ok(())
}

/// Expect 403 forbidden when a regular member creates an arena
#[tokio::test]
async fn admin_create_arena_as_member() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().with_user_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;

    let result = admin_create_arena(
        State(test.app_state()),
        test.session.clone(),
        Json(arena_form("East Rink")),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 bad request with field errors for an invalid form
#[tokio::test]
async fn admin_create_arena_invalid_form() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().with_user_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    log_in(&test, admin.id).await;

    let mut form = arena_form("");
    form.capacity = -1;

    let resp = into_response(
        admin_create_arena(State(test.app_state()), test.session.clone(), Json(form)).await,
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["capacity"].is_array());

    Ok(())
}

/// Expect 200 success when an admin replaces an arena's fields
#[tokio::test]
async fn admin_update_arena_as_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_arena_tables().with_user_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    log_in(&test, admin.id).await;

    let resp = into_response(
        admin_update_arena(
            State(test.app_state()),
            test.session.clone(),
            Path(arena.id),
            Json(arena_form("North Rink Renovated")),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["name"], "North Rink Renovated");

    Ok(())
}

/// Expect 404 not found when deleting an unknown arena, then 200 for an existing one
#[tokio::test]
async fn admin_delete_arena_as_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    log_in(&test, admin.id).await;
    let state = test.app_state();

    let missing = admin_delete_arena(
        State(state.clone()),
        test.session.clone(),
        Path(Uuid::new_v4()),
    )
    .await;
    assert_eq!(status(missing), StatusCode::NOT_FOUND);

    let deleted = admin_delete_arena(State(state.clone()), test.session.clone(), Path(arena.id)).await;
    assert_eq!(status(deleted), StatusCode::OK);

    let result = get_arena(State(state), Path(arena.id)).await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}
