//! Utility functions shared by services, controllers and the scheduler.
//!
//! Local time and slot arithmetic live in `time`, argon2 password hashing in `password`, and
//! slug, excerpt and URL helpers in `text`.

pub mod password;
pub mod text;
pub mod time;
