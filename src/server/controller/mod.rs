//! HTTP controller endpoints for the rink web API.
//!
//! Axum handlers for accounts, arenas, bookings, events and the forum. Controllers read the
//! session user, call into services and turn results into JSON responses, adding `HX-Trigger`
//! headers where partial page clients need to react. Every handler carries a utoipa path for the
//! OpenAPI document.

pub mod arena;
pub mod auth;
pub mod booking;
pub mod event;
pub mod forum;
pub mod util;
