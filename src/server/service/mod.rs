//! Service layer for business rules and transactions.
//!
//! Services sit between the controllers and the repositories. They validate input, decide
//! which domain error applies, and own every multi-step write: booking slots, cancelling,
//! registering for events and toggling votes each run inside a single database transaction.

pub mod arena;
pub mod auth;
pub mod availability;
pub mod booking;
pub mod event;
pub mod forum;
