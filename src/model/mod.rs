//! Request and response bodies shared by the HTTP API.

pub mod api;
pub mod arena;
pub mod booking;
pub mod event;
pub mod forum;
pub mod user;
