//! Database model type aliases and conversions to API enums.
//!
//! Aliases keep service signatures short; the `From` implementations translate the stored
//! string enums of the `entity` crate into the DTO enums exposed by the API.

use entity::sea_orm_active_enums::{Activity, BookingStatus, EventLevel};

use crate::model::{
    booking::{ActivityDto, BookingStatusDto},
    event::EventLevelDto,
};

/// Account with a locally stored argon2 password hash.
pub type UserModel = entity::rink_user::Model;

pub type ArenaModel = entity::arena::Model;

/// Opening hours rule for one weekday of an arena.
pub type OpeningHoursModel = entity::arena_opening_hours::Model;

/// The single row of an `(arena, date, start_hour)` slot.
///
/// Cancelled and completed rows are flipped back to booked when the slot is booked again.
pub type BookingModel = entity::booking::Model;

pub type EventModel = entity::event::Model;

pub type RegistrationModel = entity::event_registration::Model;

pub type PostModel = entity::forum_post::Model;

pub type ReplyModel = entity::forum_reply::Model;

pub type VoteModel = entity::forum_vote::Model;

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        match activity {
            Activity::IceSkating => Self::IceSkating,
            Activity::IceHockey => Self::IceHockey,
            Activity::Curling => Self::Curling,
        }
    }
}

impl From<ActivityDto> for Activity {
    fn from(activity: ActivityDto) -> Self {
        match activity {
            ActivityDto::IceSkating => Self::IceSkating,
            ActivityDto::IceHockey => Self::IceHockey,
            ActivityDto::Curling => Self::Curling,
        }
    }
}

impl From<BookingStatus> for BookingStatusDto {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Booked => Self::Booked,
            BookingStatus::Cancelled => Self::Cancelled,
            BookingStatus::Completed => Self::Completed,
        }
    }
}

impl From<BookingStatusDto> for BookingStatus {
    fn from(status: BookingStatusDto) -> Self {
        match status {
            BookingStatusDto::Booked => Self::Booked,
            BookingStatusDto::Cancelled => Self::Cancelled,
            BookingStatusDto::Completed => Self::Completed,
        }
    }
}

impl From<EventLevel> for EventLevelDto {
    fn from(level: EventLevel) -> Self {
        match level {
            EventLevel::Beginner => Self::Beginner,
            EventLevel::Intermediate => Self::Intermediate,
            EventLevel::Advanced => Self::Advanced,
        }
    }
}

impl From<EventLevelDto> for EventLevel {
    fn from(level: EventLevelDto) -> Self {
        match level {
            EventLevelDto::Beginner => Self::Beginner,
            EventLevelDto::Intermediate => Self::Intermediate,
            EventLevelDto::Advanced => Self::Advanced,
        }
    }
}
