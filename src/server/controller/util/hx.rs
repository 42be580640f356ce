//! `HX-Trigger` response header for partial page clients.
//!
//! JSON clients ignore the header; HTMX pages use the named event to refresh or close parts of
//! the page after a state change.

use axum::http::{header::HeaderName, HeaderValue};

pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Fired after a booking is created or cancelled
pub const BOOKING_CHANGED_EVENT: &str = "bookingChanged";

/// Fired after an event registration so the confirmation modal closes
pub const CLOSE_MODAL_EVENT: &str = "closeModal";

/// Header pair that triggers `event` on the client
pub fn hx_trigger(event: &'static str) -> [(HeaderName, HeaderValue); 1] {
    [(HX_TRIGGER, HeaderValue::from_static(event))]
}
