use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use entity::sea_orm_active_enums::BookingStatus;
use rink::{
    model::booking::{ActivityDto, BookingStatusDto, CreateBookingDto},
    server::controller::booking::{
        admin_delete_booking, admin_list_bookings, cancel_booking, create_booking,
        list_user_bookings, AdminBookingQuery, CancelQuery,
    },
};
use uuid::Uuid;

use super::*;

fn booking_form(date: String, hour: i32) -> Json<CreateBookingDto> {
    Json(CreateBookingDto {
        date,
        hour,
        activity: Some(ActivityDto::IceHockey),
    })
}

fn cancel_query(from: Option<&str>) -> Query<CancelQuery> {
    Query(CancelQuery {
        from: from.map(str::to_string),
    })
}

/// Expect 200 success with refreshed availability and an HX-Trigger header
#[tokio::test]
async fn create_booking_books_slot() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();
    let date = days_from_today(&state, 1);

    let result = create_booking(
        State(state),
        test.session.clone(),
        Path(arena.id),
        booking_form(date.to_string(), 10),
    )
    .await;

    let resp = into_response(result);
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("bookingChanged")
    );
    let body = json_body(resp).await;
    // 10:00 is the third slot of an 08:00 opening
    let slot = &body["slots"][2];
    assert_eq!(slot["hour"], 10);
    assert_eq!(slot["status"], "Booked");
    assert_eq!(slot["is_user_booking"], true);
    assert_eq!(slot["activity"], "ice_hockey");
    assert!(slot["booking_id"].is_string());

    Ok(())
}

/// Expect 401 unauthorized without a logged in user
#[tokio::test]
async fn create_booking_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);

    let result = create_booking(
        State(state),
        test.session.clone(),
        Path(arena.id),
        booking_form(date.to_string(), 10),
    )
    .await;

    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 409 conflict when another user already holds the slot
#[tokio::test]
async fn create_booking_conflicts_with_booked_slot() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    test.booking()
        .insert_booking(arena.id, alice.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, bob.id).await;

    let result = create_booking(
        State(state),
        test.session.clone(),
        Path(arena.id),
        booking_form(date.to_string(), 10),
    )
    .await;

    assert_eq!(status(result), StatusCode::CONFLICT);

    Ok(())
}

/// Expect a cancelled slot to be bookable again by another user
#[tokio::test]
async fn create_booking_recycles_cancelled_slot() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    let cancelled = test
        .booking()
        .insert_booking(arena.id, alice.id, date, 10, BookingStatus::Cancelled)
        .await?;
    log_in(&test, bob.id).await;

    let resp = into_response(
        create_booking(
            State(state),
            test.session.clone(),
            Path(arena.id),
            booking_form(date.to_string(), 10),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["slots"][2]["booking_id"], cancelled.id.to_string());

    Ok(())
}

/// Expect 400 bad request for past dates and malformed dates
#[tokio::test]
async fn create_booking_rejects_bad_dates() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();
    let yesterday = days_before_today(&state, 1);

    for date in [yesterday.to_string(), "not-a-date".to_string()] {
        let result = create_booking(
            State(state.clone()),
            test.session.clone(),
            Path(arena.id),
            booking_form(date, 10),
        )
        .await;

        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    Ok(())
}

/// Expect 400 bad request for an hour outside opening hours
#[tokio::test]
async fn create_booking_rejects_closed_hour() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();
    let date = days_from_today(&state, 1);

    let result = create_booking(
        State(state),
        test.session.clone(),
        Path(arena.id),
        booking_form(date.to_string(), 6),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 404 not found for an unknown arena
#[tokio::test]
async fn create_booking_unknown_arena() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;
    let state = test.app_state();
    let date = days_from_today(&state, 1);

    let result = create_booking(
        State(state),
        test.session.clone(),
        Path(Uuid::new_v4()),
        booking_form(date.to_string(), 10),
    )
    .await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 200 success with only the logged in user's bookings
#[tokio::test]
async fn list_user_bookings_returns_own_bookings() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    test.booking()
        .insert_booking(arena.id, alice.id, date, 10, BookingStatus::Booked)
        .await?;
    test.booking()
        .insert_booking(arena.id, bob.id, date, 11, BookingStatus::Booked)
        .await?;
    log_in(&test, alice.id).await;

    let resp = into_response(list_user_bookings(State(state), test.session.clone()).await);

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["arena_name"], "North Rink");
    assert_eq!(body[0]["label"], "10:00 - 11:00");

    Ok(())
}

/// Expect cancellation from the arena page to include availability
#[tokio::test]
async fn cancel_booking_from_arena_page() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    let booking = test
        .booking()
        .insert_booking(arena.id, user.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, user.id).await;

    let resp = into_response(
        cancel_booking(
            State(state),
            test.session.clone(),
            Path(booking.id),
            cancel_query(Some("arena")),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("HX-Trigger"));
    let body = json_body(resp).await;
    assert_eq!(body["booking"]["status"], "Cancelled");
    assert_eq!(body["availability"]["slots"][2]["status"], "Available");

    Ok(())
}

/// Expect cancellation from the bookings page to omit availability
#[tokio::test]
async fn cancel_booking_from_bookings_page() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    let booking = test
        .booking()
        .insert_booking(arena.id, user.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, user.id).await;

    let resp = into_response(
        cancel_booking(
            State(state),
            test.session.clone(),
            Path(booking.id),
            cancel_query(None),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(json_body(resp).await["availability"].is_null());

    Ok(())
}

/// Expect 403 forbidden when cancelling another user's booking
#[tokio::test]
async fn cancel_booking_of_other_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    let booking = test
        .booking()
        .insert_booking(arena.id, alice.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, bob.id).await;

    let result = cancel_booking(
        State(state),
        test.session.clone(),
        Path(booking.id),
        cancel_query(None),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 bad request when cancelling a booking on a past date
#[tokio::test]
async fn cancel_booking_in_past() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_before_today(&state, 2);
    let booking = test
        .booking()
        .insert_booking(arena.id, user.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, user.id).await;

    let result = cancel_booking(
        State(state),
        test.session.clone(),
        Path(booking.id),
        cancel_query(None),
    )
    .await;

    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect admins to filter bookings by status
#[tokio::test]
async fn admin_list_bookings_filters_status() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    test.booking()
        .insert_booking(arena.id, user.id, date, 10, BookingStatus::Booked)
        .await?;
    test.booking()
        .insert_booking(arena.id, user.id, date, 11, BookingStatus::Cancelled)
        .await?;
    log_in(&test, admin.id).await;

    let resp = into_response(
        admin_list_bookings(
            State(state),
            test.session.clone(),
            Query(AdminBookingQuery {
                arena_id: Some(arena.id),
                status: Some(BookingStatusDto::Cancelled),
                date: Some(date.to_string()),
            }),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["start_hour"], 11);

    Ok(())
}

/// Expect 403 forbidden for members listing all bookings
#[tokio::test]
async fn admin_list_bookings_as_member() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    log_in(&test, user.id).await;

    let result = admin_list_bookings(
        State(test.app_state()),
        test.session.clone(),
        Query(AdminBookingQuery {
            arena_id: None,
            status: None,
            date: None,
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect the slot to be free after an admin deletes its booking
#[tokio::test]
async fn admin_delete_booking_frees_slot() -> Result<(), TestError> {
    let test = TestBuilder::new().with_booking_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let user = test.user().insert_user("alice").await?;
    let arena = test.arena().insert_arena("North Rink").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 1);
    let booking = test
        .booking()
        .insert_booking(arena.id, user.id, date, 10, BookingStatus::Booked)
        .await?;
    log_in(&test, admin.id).await;

    let deleted =
        admin_delete_booking(State(state.clone()), test.session.clone(), Path(booking.id)).await;
    assert_eq!(status(deleted), StatusCode::OK);

    let again = admin_delete_booking(State(state), test.session.clone(), Path(booking.id)).await;
    assert_eq!(status(again), StatusCode::NOT_FOUND);

    Ok(())
}
