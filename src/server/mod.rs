//! Server application core modules.
//!
//! HTTP routing, sessions, database access and the background scheduler for arena bookings,
//! event registrations and the community forum.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
