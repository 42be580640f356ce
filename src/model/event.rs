use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::model::booking::ActivityDto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventLevelDto {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventDto {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: ActivityDto,
    pub level: EventLevelDto,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub location: String,
    /// Fee in the smallest currency unit
    pub registration_fee: i64,
    pub max_participants: Option<i32>,
    pub registered_count: u64,
    pub is_full: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventDetailDto {
    pub event: EventDto,
    pub is_registered: bool,
    pub related_events: Vec<EventDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegistrationDto {
    pub event: EventDto,
    pub registered_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MyEventsDto {
    pub upcoming: Vec<RegistrationDto>,
    pub past: Vec<RegistrationDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventFormDto {
    pub name: String,
    pub description: String,
    pub category: ActivityDto,
    pub level: EventLevelDto,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub location: String,
    #[serde(default)]
    pub registration_fee: i64,
    #[serde(default)]
    pub max_participants: Option<i32>,
}
