//! SeaORM entities for the rink database schema.

pub mod prelude;

pub mod arena;
pub mod arena_opening_hours;
pub mod booking;
pub mod event;
pub mod event_registration;
pub mod forum_post;
pub mod forum_reply;
pub mod forum_vote;
pub mod rink_user;
pub mod sea_orm_active_enums;
