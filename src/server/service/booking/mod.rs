//! Hourly arena booking, cancellation and the completion sweep.
//!
//! A slot is the `(arena, date, start_hour)` tuple and owns exactly one row for its whole
//! life. Booking a slot reads that row with `SELECT ... FOR UPDATE` inside a transaction and
//! then inserts it, recycles a cancelled or completed row, or rejects the request when it is
//! already booked. A concurrent insert that wins the race surfaces as a unique constraint
//! violation, which is reported the same way as an already booked slot.

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use entity::sea_orm_active_enums::{Activity, BookingStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, SqlErr, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::{
        arena::AvailabilityDto,
        booking::{BookingDto, CancelBookingDto},
        user::UserSummaryDto,
    },
    server::{
        data::{
            arena::{ArenaRepository, OpeningHoursRepository},
            booking::{BookingFilter, BookingRepository},
            user::UserRepository,
        },
        error::{arena::ArenaError, booking::BookingError, Error},
        model::db::{ArenaModel, BookingModel, UserModel},
        service::availability::AvailabilityService,
        util::time::{local_datetime, slot_label, slot_within_hours, weekday_index},
    },
};

/// A request to book one slot.
#[derive(Clone, Debug)]
pub struct BookingRequest {
    pub arena_id: Uuid,
    pub user_id: i32,
    pub date: NaiveDate,
    pub hour: i32,
    pub activity: Option<Activity>,
}

pub struct BookingService<'a> {
    db: &'a DatabaseConnection,
    utc_offset: FixedOffset,
}

impl<'a> BookingService<'a> {
    /// Creates a new instance of [`BookingService`]
    pub fn new(db: &'a DatabaseConnection, utc_offset: FixedOffset) -> Self {
        Self { db, utc_offset }
    }

    /// Books a slot for a user
    ///
    /// # Returns
    /// - `Ok(AvailabilityDto)` - Availability of the arena on the booked date after the change
    /// - `Err(Error::BookingError)` - Past date, invalid or closed hour, started slot, or the
    ///   slot is already booked
    /// - `Err(Error::ArenaError(ArenaError::NotFound))` - The arena does not exist
    pub async fn create_booking(&self, request: BookingRequest) -> Result<AvailabilityDto, Error> {
        let now = local_datetime(Utc::now(), self.utc_offset);

        self.create_booking_at(now, request).await
    }

    async fn create_booking_at(
        &self,
        now: NaiveDateTime,
        request: BookingRequest,
    ) -> Result<AvailabilityDto, Error> {
        let BookingRequest {
            arena_id,
            user_id,
            date,
            hour,
            activity,
        } = request;

        let today = now.date();
        if date < today {
            return Err(BookingError::PastDate(date).into());
        }
        if !(0..=23).contains(&hour) {
            return Err(BookingError::InvalidHour(hour).into());
        }

        if ArenaRepository::new(self.db).get(arena_id).await?.is_none() {
            return Err(ArenaError::NotFound(arena_id).into());
        }

        let rule = OpeningHoursRepository::new(self.db)
            .get_for_day(arena_id, weekday_index(date))
            .await?;
        let within_hours = rule
            .and_then(|r| r.open_time.zip(r.close_time))
            .is_some_and(|(open, close)| slot_within_hours(hour as u32, open, close));
        if !within_hours {
            return Err(BookingError::OutsideOpeningHours { date, hour }.into());
        }

        if date == today && hour as u32 <= now.hour() {
            return Err(BookingError::SlotStarted { date, hour }.into());
        }

        let txn = self.db.begin().await?;

        let booking_repo = BookingRepository::new(&txn);
        let booking = match booking_repo.get_slot_for_update(arena_id, date, hour).await? {
            Some(existing) if existing.status == BookingStatus::Booked => {
                return Err(BookingError::SlotUnavailable.into());
            }
            Some(existing) => booking_repo.rebook(existing, user_id, activity).await?,
            None => insert_slot(&booking_repo, arena_id, user_id, date, hour, activity).await?,
        };

        txn.commit().await?;

        tracing::debug!(
            "User ID {} booked slot {}:00 on {} at arena {} as booking {}",
            user_id,
            hour,
            date,
            arena_id,
            booking.id
        );

        AvailabilityService::new(self.db, self.utc_offset)
            .get_slots(arena_id, date, Some(user_id))
            .await
    }

    /// Cancels a booking owned by the user
    ///
    /// Cancelling an already cancelled or completed booking succeeds without changes.
    ///
    /// # Arguments
    /// - `include_availability` - Also return the arena's availability for the booking's date
    ///
    /// # Returns
    /// - `Err(Error::BookingError(BookingError::NotFound))` - No booking with the ID
    /// - `Err(Error::BookingError(BookingError::NotOwner))` - Booked by another user, untouched
    /// - `Err(Error::BookingError(BookingError::PastCancellation))` - The booking date is past
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        user_id: i32,
        include_availability: bool,
    ) -> Result<CancelBookingDto, Error> {
        let today = local_datetime(Utc::now(), self.utc_offset).date();

        self.cancel_booking_on(today, booking_id, user_id, include_availability)
            .await
    }

    async fn cancel_booking_on(
        &self,
        today: NaiveDate,
        booking_id: Uuid,
        user_id: i32,
        include_availability: bool,
    ) -> Result<CancelBookingDto, Error> {
        let txn = self.db.begin().await?;

        let booking_repo = BookingRepository::new(&txn);
        let Some(booking) = booking_repo.get_for_update(booking_id).await? else {
            return Err(BookingError::NotFound(booking_id).into());
        };

        if booking.user_id != user_id {
            return Err(BookingError::NotOwner {
                booking_id,
                user_id,
            }
            .into());
        }

        if booking.date < today {
            return Err(BookingError::PastCancellation(booking_id).into());
        }

        let booking = if booking.status == BookingStatus::Booked {
            booking_repo
                .set_status(booking, BookingStatus::Cancelled)
                .await?
        } else {
            booking
        };

        txn.commit().await?;

        let dto = self.booking_dto(booking).await?;

        let availability = if include_availability {
            Some(
                AvailabilityService::new(self.db, self.utc_offset)
                    .get_slots(dto.arena_id, dto.date, Some(user_id))
                    .await?,
            )
        } else {
            None
        };

        Ok(CancelBookingDto {
            booking: dto,
            availability,
        })
    }

    /// A user's bookings, newest date first then by hour
    pub async fn list_user_bookings(&self, user_id: i32) -> Result<Vec<BookingDto>, Error> {
        let rows = BookingRepository::new(self.db)
            .get_by_user_with_arena(user_id)
            .await?;

        self.booking_dtos(rows).await
    }

    /// Every booking matching the filter, newest date first then by hour
    pub async fn admin_list_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingDto>, Error> {
        let rows = BookingRepository::new(self.db)
            .get_filtered_with_arena(filter)
            .await?;

        self.booking_dtos(rows).await
    }

    pub async fn admin_delete_booking(&self, booking_id: Uuid) -> Result<(), Error> {
        let result = BookingRepository::new(self.db).delete(booking_id).await?;

        if result.rows_affected == 0 {
            return Err(BookingError::NotFound(booking_id).into());
        }

        tracing::info!("Deleted booking {}", booking_id);

        Ok(())
    }

    /// Marks booked slots that ended before `now` as completed
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of bookings completed
    pub async fn complete_elapsed_bookings(&self, now: DateTime<Utc>) -> Result<u64, Error> {
        let local = local_datetime(now, self.utc_offset);

        let completed = BookingRepository::new(self.db)
            .complete_elapsed(local.date(), local.hour() as i32)
            .await?;

        if completed > 0 {
            tracing::info!("Marked {} elapsed bookings as completed", completed);
        }

        Ok(completed)
    }

    async fn booking_dto(&self, booking: BookingModel) -> Result<BookingDto, Error> {
        let arena = ArenaRepository::new(self.db).get(booking.arena_id).await?;

        let mut dtos = self.booking_dtos(vec![(booking, arena)]).await?;

        dtos.pop().ok_or_else(|| {
            Error::InternalError("Booking disappeared while building its response".to_string())
        })
    }

    async fn booking_dtos(
        &self,
        rows: Vec<(BookingModel, Option<ArenaModel>)>,
    ) -> Result<Vec<BookingDto>, Error> {
        let mut user_ids: Vec<i32> = rows.iter().map(|(b, _)| b.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<i32, UserModel> = UserRepository::new(self.db)
            .get_many(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        rows.into_iter()
            .map(|(booking, arena)| {
                // Both foreign keys cascade on delete so a missing parent means a broken schema
                let arena = arena.ok_or_else(|| {
                    Error::InternalError(format!(
                        "Failed to find arena {} for booking {}",
                        booking.arena_id, booking.id
                    ))
                })?;
                let user = users.get(&booking.user_id).ok_or_else(|| {
                    Error::InternalError(format!(
                        "Failed to find user ID {} for booking {}",
                        booking.user_id, booking.id
                    ))
                })?;

                Ok(BookingDto {
                    id: booking.id,
                    arena_id: booking.arena_id,
                    arena_name: arena.name,
                    user: UserSummaryDto {
                        id: user.id,
                        username: user.username.clone(),
                    },
                    date: booking.date,
                    start_hour: booking.start_hour,
                    label: slot_label(booking.start_hour as u32),
                    status: booking.status.into(),
                    activity: booking.activity.map(Into::into),
                    booked_at: booking.booked_at,
                })
            })
            .collect()
    }
}

/// Inserts the row of a free slot, reporting a concurrent insert as an unavailable slot
async fn insert_slot<C: ConnectionTrait>(
    booking_repo: &BookingRepository<'_, C>,
    arena_id: Uuid,
    user_id: i32,
    date: NaiveDate,
    hour: i32,
    activity: Option<Activity>,
) -> Result<BookingModel, Error> {
    match booking_repo
        .create(arena_id, user_id, date, hour, activity)
        .await
    {
        Ok(booking) => Ok(booking),
        Err(err) => {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                tracing::debug!(
                    "Concurrent booking won slot {}:00 on {} at arena {}",
                    hour,
                    date,
                    arena_id
                );
                return Err(BookingError::SlotUnavailable.into());
            }
            Err(err.into())
        }
    }
}
