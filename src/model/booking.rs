use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{arena::AvailabilityDto, user::UserSummaryDto};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityDto {
    IceSkating,
    IceHockey,
    Curling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum BookingStatusDto {
    Booked,
    Cancelled,
    Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateBookingDto {
    /// Date of the slot as `YYYY-MM-DD`
    pub date: String,
    pub hour: i32,
    #[serde(default)]
    pub activity: Option<ActivityDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingDto {
    pub id: Uuid,
    pub arena_id: Uuid,
    pub arena_name: String,
    pub user: UserSummaryDto,
    pub date: NaiveDate,
    pub start_hour: i32,
    pub label: String,
    pub status: BookingStatusDto,
    pub activity: Option<ActivityDto>,
    pub booked_at: NaiveDateTime,
}

/// Result of a cancellation, with refreshed availability when requested from the arena page
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CancelBookingDto {
    pub booking: BookingDto,
    pub availability: Option<AvailabilityDto>,
}
