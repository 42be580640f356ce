//! Helpers shared by controllers.
//!
//! `get_user` resolves the session user for protected endpoints and `hx` builds the
//! `HX-Trigger` header partial page clients listen for.

pub mod get_user;
pub mod hx;
