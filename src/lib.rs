//! Arena booking, event registration and community forum backend for an ice rink.

pub mod model;
pub mod server;
