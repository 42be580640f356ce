//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries per domain. Each one is generic over `ConnectionTrait` so
//! the same methods run against a plain connection or inside a transaction.

pub mod arena;
pub mod booking;
pub mod event;
pub mod forum;
pub mod user;
