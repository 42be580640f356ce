//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here with its utoipa specification, and Swagger UI serves
//! the collected document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path with different methods are registered in the same `routes!` call.
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(AppState::new(db, utc_offset)).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Rink", description = "Rink API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Account registration and session routes"),
        (name = controller::arena::ARENA_TAG, description = "Arenas, opening hours and slot availability"),
        (name = controller::booking::BOOKING_TAG, description = "Hourly slot bookings"),
        (name = controller::event::EVENT_TAG, description = "Events and registrations"),
        (name = controller::forum::FORUM_TAG, description = "Community forum posts, replies and votes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::arena::list_arenas))
        .routes(routes!(controller::arena::get_arena))
        .routes(routes!(controller::arena::get_slots))
        .routes(routes!(controller::booking::create_booking))
        .routes(routes!(controller::booking::list_user_bookings))
        .routes(routes!(controller::booking::cancel_booking))
        .routes(routes!(controller::booking::admin_list_bookings))
        .routes(routes!(controller::booking::admin_delete_booking))
        .routes(routes!(controller::arena::admin_create_arena))
        .routes(routes!(
            controller::arena::admin_update_arena,
            controller::arena::admin_delete_arena
        ))
        .routes(routes!(controller::event::list_events))
        .routes(routes!(controller::event::my_events))
        .routes(routes!(controller::event::get_event))
        .routes(routes!(controller::event::register))
        .routes(routes!(controller::event::cancel_registration))
        .routes(routes!(controller::event::admin_create_event))
        .routes(routes!(controller::event::admin_delete_event))
        .routes(routes!(controller::forum::top_posts))
        .routes(routes!(controller::forum::create_post))
        .routes(routes!(controller::forum::get_post))
        .routes(routes!(controller::forum::add_reply))
        .routes(routes!(controller::forum::toggle_vote))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
