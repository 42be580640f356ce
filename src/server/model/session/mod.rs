//! Session data models and utilities.
//!
//! Type-safe wrappers for values kept in the tower-sessions store (Valkey/Redis in production,
//! in memory for tests): the logged in user's ID and the anonymous forum voter key.

pub mod user;
pub mod voter;
