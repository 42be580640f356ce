//! Hourly slot availability of an arena on a date.
//!
//! A slot is booked only while its row has status `Booked`; cancelled and completed rows leave
//! the slot available. The same view is returned after every booking change so partial page
//! updates and JSON clients always see the post-change state.

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use entity::sea_orm_active_enums::BookingStatus;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::arena::{AvailabilityDto, SlotDto, SlotStatus},
    server::{
        data::{
            arena::{ArenaRepository, OpeningHoursRepository},
            booking::BookingRepository,
        },
        error::{arena::ArenaError, booking::BookingError, Error},
        util::time::{local_today, parse_date, slot_hours, slot_label, weekday_index},
    },
};

/// Parses the `date` query parameter of availability requests
pub fn parse_date_param(date: Option<&str>) -> Result<NaiveDate, BookingError> {
    let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return Err(BookingError::DateRequired);
    };

    parse_date(date).ok_or_else(|| BookingError::InvalidDate(date.to_string()))
}

pub struct AvailabilityService<'a> {
    db: &'a DatabaseConnection,
    utc_offset: FixedOffset,
}

impl<'a> AvailabilityService<'a> {
    /// Creates a new instance of [`AvailabilityService`]
    pub fn new(db: &'a DatabaseConnection, utc_offset: FixedOffset) -> Self {
        Self { db, utc_offset }
    }

    /// Slots of an arena on `date` as seen by `requester_id`
    ///
    /// # Returns
    /// - `Ok(AvailabilityDto)` - Slots ordered by hour, empty with `is_closed_today` when the
    ///   arena has no opening hours for the weekday
    /// - `Err(Error::ArenaError(ArenaError::NotFound))` - The arena does not exist
    pub async fn get_slots(
        &self,
        arena_id: Uuid,
        date: NaiveDate,
        requester_id: Option<i32>,
    ) -> Result<AvailabilityDto, Error> {
        if ArenaRepository::new(self.db).get(arena_id).await?.is_none() {
            return Err(ArenaError::NotFound(arena_id).into());
        }

        let is_bookable_date = date >= local_today(self.utc_offset);

        let rule = OpeningHoursRepository::new(self.db)
            .get_for_day(arena_id, weekday_index(date))
            .await?;
        let Some((open, close)) = rule.and_then(|r| r.open_time.zip(r.close_time)) else {
            return Ok(AvailabilityDto {
                arena_id,
                date,
                is_closed_today: true,
                is_bookable_date,
                slots: Vec::new(),
            });
        };

        let booked: HashMap<i32, _> = BookingRepository::new(self.db)
            .get_by_arena_and_date(arena_id, date)
            .await?
            .into_iter()
            .filter(|b| b.status == BookingStatus::Booked)
            .map(|b| (b.start_hour, b))
            .collect();

        let slots = slot_hours(open, close)
            .into_iter()
            .map(|hour| match booked.get(&(hour as i32)) {
                Some(booking) => {
                    let is_user_booking = requester_id == Some(booking.user_id);

                    SlotDto {
                        hour,
                        label: slot_label(hour),
                        status: SlotStatus::Booked,
                        is_user_booking,
                        booking_id: is_user_booking.then_some(booking.id),
                        activity: booking.activity.map(Into::into),
                    }
                }
                None => SlotDto {
                    hour,
                    label: slot_label(hour),
                    status: SlotStatus::Available,
                    is_user_booking: false,
                    booking_id: None,
                    activity: None,
                },
            })
            .collect();

        Ok(AvailabilityDto {
            arena_id,
            date,
            is_closed_today: false,
            is_bookable_date,
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    fn future_date(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    mod parse_date_param {
        use crate::server::{error::booking::BookingError, service::availability::parse_date_param};

        #[test]
        fn requires_date() {
            assert!(matches!(
                parse_date_param(None),
                Err(BookingError::DateRequired)
            ));
            assert!(matches!(
                parse_date_param(Some(" ")),
                Err(BookingError::DateRequired)
            ));
        }

        #[test]
        fn rejects_malformed_date() {
            assert!(matches!(
                parse_date_param(Some("15/02/2026")),
                Err(BookingError::InvalidDate(_))
            ));
        }

        #[test]
        fn parses_iso_date() {
            assert!(parse_date_param(Some("2026-02-15")).is_ok());
        }
    }

    mod get_slots {
        use chrono::{Duration, NaiveTime};
        use entity::sea_orm_active_enums::BookingStatus;
        use rink_test_utils::prelude::*;
        use uuid::Uuid;

        use super::future_date;
        use crate::{
            model::arena::SlotStatus,
            server::{
                error::{arena::ArenaError, Error},
                model::app::AppState,
                service::availability::AvailabilityService,
                util::time::weekday_index,
            },
        };

        /// Expect one slot per whole hour inside the opening hours
        #[tokio::test]
        async fn lists_hourly_slots() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let arena = test
                .arena()
                .insert_arena_with_hours("North Rink", weekly_hours(9, 12))
                .await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let availability = service.get_slots(arena.id, future_date(1), None).await.unwrap();

            assert!(!availability.is_closed_today);
            assert!(availability.is_bookable_date);
            let labels: Vec<_> = availability.slots.iter().map(|s| s.label.as_str()).collect();
            assert_eq!(labels, vec!["09:00 - 10:00", "10:00 - 11:00", "11:00 - 12:00"]);
            assert!(availability
                .slots
                .iter()
                .all(|s| s.status == SlotStatus::Available));

            Ok(())
        }

        /// Expect a half-hour close to drop the partial final hour
        #[tokio::test]
        async fn skips_partial_hours() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let open = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
            let close = NaiveTime::from_hms_opt(11, 30, 0).unwrap();
            let arena = test
                .arena()
                .insert_arena_with_hours(
                    "North Rink",
                    (0..7).map(|day| (day, Some((open, close)))).collect(),
                )
                .await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let availability = service.get_slots(arena.id, future_date(1), None).await.unwrap();

            let hours: Vec<_> = availability.slots.iter().map(|s| s.hour).collect();
            assert_eq!(hours, vec![9, 10]);

            Ok(())
        }

        /// Expect a closed day without a rule to report no slots
        #[tokio::test]
        async fn reports_closed_day() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let date = future_date(1);
            let open_days = weekly_hours(8, 22)
                .into_iter()
                .map(|(day, hours)| {
                    if day == weekday_index(date) {
                        (day, None)
                    } else {
                        (day, hours)
                    }
                })
                .collect();
            let arena = test
                .arena()
                .insert_arena_with_hours("North Rink", open_days)
                .await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let availability = service.get_slots(arena.id, date, None).await.unwrap();

            assert!(availability.is_closed_today);
            assert!(availability.slots.is_empty());

            Ok(())
        }

        /// Expect only booked rows to block slots and own bookings to expose their ID
        #[tokio::test]
        async fn marks_booked_and_own_slots() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let alice = test.user().insert_user("alice").await?;
            let bob = test.user().insert_user("bob").await?;
            let arena = test
                .arena()
                .insert_arena_with_hours("North Rink", weekly_hours(9, 13))
                .await?;
            let date = future_date(2);
            let own = test
                .booking()
                .insert_booking(arena.id, alice.id, date, 9, BookingStatus::Booked)
                .await?;
            test.booking()
                .insert_booking(arena.id, bob.id, date, 10, BookingStatus::Booked)
                .await?;
            test.booking()
                .insert_booking(arena.id, bob.id, date, 11, BookingStatus::Cancelled)
                .await?;
            test.booking()
                .insert_booking(arena.id, bob.id, date, 12, BookingStatus::Completed)
                .await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let slots = service
                .get_slots(arena.id, date, Some(alice.id))
                .await
                .unwrap()
                .slots;

            assert_eq!(slots[0].status, SlotStatus::Booked);
            assert!(slots[0].is_user_booking);
            assert_eq!(slots[0].booking_id, Some(own.id));
            assert_eq!(slots[1].status, SlotStatus::Booked);
            assert!(!slots[1].is_user_booking);
            assert_eq!(slots[1].booking_id, None);
            assert_eq!(slots[2].status, SlotStatus::Available);
            assert_eq!(slots[3].status, SlotStatus::Available);

            Ok(())
        }

        /// Expect past dates to be viewable but not bookable
        #[tokio::test]
        async fn flags_past_dates() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let arena = test.arena().insert_arena("North Rink").await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let date = future_date(0) - Duration::days(3);
            let availability = service.get_slots(arena.id, date, None).await.unwrap();

            assert!(!availability.is_bookable_date);

            Ok(())
        }

        /// Expect NotFound for an unknown arena
        #[tokio::test]
        async fn fails_for_unknown_arena() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let state: AppState = test.into_app_state();

            let service = AvailabilityService::new(&state.db, state.utc_offset);
            let result = service.get_slots(Uuid::new_v4(), future_date(1), None).await;

            assert!(matches!(
                result,
                Err(Error::ArenaError(ArenaError::NotFound(_)))
            ));

            Ok(())
        }
    }
}
