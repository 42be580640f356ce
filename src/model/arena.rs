use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::booking::ActivityDto;

/// Opening hours for one weekday.
///
/// `day` runs from 0 (Monday) to 6 (Sunday). Times are `HH:MM`; both absent means closed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OpeningHoursDto {
    pub day: i32,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ArenaDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub location: String,
    pub img_url: Option<String>,
    pub opening_hours_text: Option<String>,
    pub google_maps_url: Option<String>,
    pub opening_hours: Vec<OpeningHoursDto>,
}

/// Admin form used to create or replace an arena and its weekly opening hours
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ArenaFormDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub capacity: i32,
    pub location: String,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub opening_hours_text: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHoursDto>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum SlotStatus {
    Available,
    Booked,
}

/// One bookable hour of an arena on a given date
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SlotDto {
    pub hour: u32,
    /// Display label, e.g. `09:00 - 10:00`
    pub label: String,
    pub status: SlotStatus,
    /// Whether the slot is booked by the requesting user
    pub is_user_booking: bool,
    /// Only present on the requesting user's own booking
    pub booking_id: Option<Uuid>,
    pub activity: Option<ActivityDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AvailabilityDto {
    pub arena_id: Uuid,
    pub date: NaiveDate,
    pub is_closed_today: bool,
    pub is_bookable_date: bool,
    pub slots: Vec<SlotDto>,
}
