use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use entity::sea_orm_active_enums::Activity;
use rink::{
    model::{
        booking::ActivityDto,
        event::{EventFormDto, EventLevelDto},
    },
    server::controller::event::{
        admin_create_event, admin_delete_event, cancel_registration, get_event, list_events,
        my_events, register, EventListQuery,
    },
};

use super::*;

fn event_form(name: &str, date: NaiveDate) -> Json<EventFormDto> {
    Json(EventFormDto {
        name: name.to_string(),
        description: "Learn to skate backwards".to_string(),
        category: ActivityDto::IceSkating,
        level: EventLevelDto::Beginner,
        date,
        start_time: "18:00".to_string(),
        end_time: "19:30".to_string(),
        location: "North Rink".to_string(),
        registration_fee: 0,
        max_participants: Some(20),
    })
}

/// Expect only upcoming events of the requested category
#[tokio::test]
async fn list_events_filters_by_category() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let state = test.app_state();
    let date = days_from_today(&state, 3);
    test.event()
        .insert_event_in_category("hockey-night", date, None, Activity::IceHockey)
        .await?;
    test.event().insert_event("open-skate", date, None).await?;
    test.event()
        .insert_event("last-week", days_before_today(&state, 7), None)
        .await?;

    let resp = into_response(
        list_events(
            State(state),
            Query(EventListQuery {
                category: Some(ActivityDto::IceSkating),
                level: None,
            }),
        )
        .await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["slug"], "open-skate");

    Ok(())
}

/// Expect 200 success with registration state for the logged in user
#[tokio::test]
async fn get_event_shows_registration() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    let event = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), Some(10))
        .await?;
    test.event().insert_registration(event.id, user.id).await?;
    log_in(&test, user.id).await;

    let resp = into_response(
        get_event(State(state), test.session.clone(), Path("open-skate".to_string())).await,
    );

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["is_registered"], true);
    assert_eq!(body["event"]["registered_count"], 1);

    Ok(())
}

/// Expect 404 not found for an unknown slug
#[tokio::test]
async fn get_event_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;

    let result = get_event(
        State(test.app_state()),
        test.session.clone(),
        Path("missing".to_string()),
    )
    .await;

    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 201 created with a closeModal trigger after registering
#[tokio::test]
async fn register_for_event() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    test.event()
        .insert_event("open-skate", days_from_today(&state, 3), Some(10))
        .await?;
    log_in(&test, user.id).await;

    let resp = into_response(
        register(State(state), test.session.clone(), Path("open-skate".to_string())).await,
    );

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("closeModal")
    );
    assert_eq!(json_body(resp).await["is_registered"], true);

    Ok(())
}

/// Expect 409 conflict when the event is full
#[tokio::test]
async fn register_for_full_event() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let alice = test.user().insert_user("alice").await?;
    let bob = test.user().insert_user("bob").await?;
    let state = test.app_state();
    let event = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), Some(1))
        .await?;
    test.event().insert_registration(event.id, alice.id).await?;
    log_in(&test, bob.id).await;

    let result = register(State(state), test.session.clone(), Path("open-skate".to_string())).await;

    assert_eq!(status(result), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 400 bad request for registering twice or for a past event
#[tokio::test]
async fn register_rejects_duplicate_and_past() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    let event = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), None)
        .await?;
    test.event()
        .insert_event("last-week", days_before_today(&state, 7), None)
        .await?;
    test.event().insert_registration(event.id, user.id).await?;
    log_in(&test, user.id).await;

    for slug in ["open-skate", "last-week"] {
        let result = register(
            State(state.clone()),
            test.session.clone(),
            Path(slug.to_string()),
        )
        .await;

        assert_eq!(status(result), StatusCode::BAD_REQUEST);
    }

    Ok(())
}

/// Expect 200 success on the first cancellation and 404 on the second
#[tokio::test]
async fn cancel_registration_once() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    let event = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), None)
        .await?;
    test.event().insert_registration(event.id, user.id).await?;
    log_in(&test, user.id).await;

    let first = cancel_registration(
        State(state.clone()),
        test.session.clone(),
        Path("open-skate".to_string()),
    )
    .await;
    assert_eq!(status(first), StatusCode::OK);

    let second =
        cancel_registration(State(state), test.session.clone(), Path("open-skate".to_string()))
            .await;
    assert_eq!(status(second), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect registrations split into upcoming and past
#[tokio::test]
async fn my_events_splits_upcoming_and_past() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    let upcoming = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), None)
        .await?;
    let past = test
        .event()
        .insert_event("last-week", days_before_today(&state, 7), None)
        .await?;
    test.event().insert_registration(upcoming.id, user.id).await?;
    test.event().insert_registration(past.id, user.id).await?;
    log_in(&test, user.id).await;

    let resp = into_response(my_events(State(state), test.session.clone()).await);

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["upcoming"][0]["event"]["slug"], "open-skate");
    assert_eq!(body["past"][0]["event"]["slug"], "last-week");

    Ok(())
}

/// Expect 201 created with a unique slug for a repeated name
#[tokio::test]
async fn admin_create_event_derives_unique_slug() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 5);
    log_in(&test, admin.id).await;

    let first = into_response(
        admin_create_event(
            State(state.clone()),
            test.session.clone(),
            event_form("Learn to Skate", date),
        )
        .await,
    );
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(json_body(first).await["slug"], "learn-to-skate");

    let second = into_response(
        admin_create_event(State(state), test.session.clone(), event_form("Learn to Skate", date))
            .await,
    );
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(json_body(second).await["slug"], "learn-to-skate-2");

    Ok(())
}

/// Expect 403 forbidden for members creating events
#[tokio::test]
async fn admin_create_event_as_member() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let user = test.user().insert_user("alice").await?;
    let state = test.app_state();
    let date = days_from_today(&state, 5);
    log_in(&test, user.id).await;

    let result = admin_create_event(
        State(state),
        test.session.clone(),
        event_form("Learn to Skate", date),
    )
    .await;

    assert_eq!(status(result), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect the event to be gone after an admin deletes it
#[tokio::test]
async fn admin_delete_event_removes_event() -> Result<(), TestError> {
    let test = TestBuilder::new().with_event_tables().build().await?;
    let admin = test.user().insert_admin("admin").await?;
    let state = test.app_state();
    let event = test
        .event()
        .insert_event("open-skate", days_from_today(&state, 3), None)
        .await?;
    log_in(&test, admin.id).await;

    let deleted =
        admin_delete_event(State(state.clone()), test.session.clone(), Path(event.id)).await;
    assert_eq!(status(deleted), StatusCode::OK);

    let result = get_event(State(state), test.session.clone(), Path("open-skate".to_string())).await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}
