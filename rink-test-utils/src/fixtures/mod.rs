//! Database fixtures inserted during test execution.
//!
//! - `user` - members and admins with a known password
//! - `arena` - arenas with weekly opening hours
//! - `booking` - booking rows in any status
//! - `event` - events and registrations
//! - `forum` - posts, replies and votes

pub mod arena;
pub mod booking;
pub mod event;
pub mod forum;
pub mod user;

/// Plain-text password every fixture user is created with.
pub const TEST_PASSWORD: &str = "correct-horse-battery";
