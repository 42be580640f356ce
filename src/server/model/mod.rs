//! Server application models and type definitions.
//!
//! Application state, database model aliases and typed session wrappers.

pub mod app;
pub mod db;
pub mod session;
