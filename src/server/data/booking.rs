//! Booking repository.
//!
//! There is at most one row per `(arena_id, date, start_hour)` slot, enforced by a unique index.
//! Booking a previously cancelled or completed slot rewrites that row rather than inserting a
//! new one, so the slot lookup here is the single source of truth for availability.

use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{Activity, BookingStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

/// Optional filters for the admin booking list.
#[derive(Clone, Debug, Default)]
pub struct BookingFilter {
    pub arena_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub date: Option<NaiveDate>,
}

pub struct BookingRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingRepository<'a, C> {
    /// Creates a new instance of [`BookingRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Reads the row of a slot with `SELECT ... FOR UPDATE`
    ///
    /// Must be called inside a transaction; the lock is held until it commits or rolls back.
    pub async fn get_slot_for_update(
        &self,
        arena_id: Uuid,
        date: NaiveDate,
        start_hour: i32,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::ArenaId.eq(arena_id))
            .filter(entity::booking::Column::Date.eq(date))
            .filter(entity::booking::Column::StartHour.eq(start_hour))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Reads a booking by ID with `SELECT ... FOR UPDATE`
    pub async fn get_for_update(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find_by_id(booking_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    pub async fn get(&self, booking_id: Uuid) -> Result<Option<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find_by_id(booking_id)
            .one(self.db)
            .await
    }

    /// Inserts a new booked row for a slot
    ///
    /// Fails with a unique constraint violation when another row for the slot already exists.
    pub async fn create(
        &self,
        arena_id: Uuid,
        user_id: i32,
        date: NaiveDate,
        start_hour: i32,
        activity: Option<Activity>,
    ) -> Result<entity::booking::Model, DbErr> {
        let booking = entity::booking::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            arena_id: ActiveValue::Set(arena_id),
            user_id: ActiveValue::Set(user_id),
            date: ActiveValue::Set(date),
            start_hour: ActiveValue::Set(start_hour),
            booked_at: ActiveValue::Set(Utc::now().naive_utc()),
            status: ActiveValue::Set(BookingStatus::Booked),
            activity: ActiveValue::Set(activity),
        };

        booking.insert(self.db).await
    }

    /// Flips a cancelled or completed row back to booked for a new owner
    pub async fn rebook(
        &self,
        booking: entity::booking::Model,
        user_id: i32,
        activity: Option<Activity>,
    ) -> Result<entity::booking::Model, DbErr> {
        let mut booking_am = booking.into_active_model();
        booking_am.user_id = ActiveValue::Set(user_id);
        booking_am.activity = ActiveValue::Set(activity);
        booking_am.booked_at = ActiveValue::Set(Utc::now().naive_utc());
        booking_am.status = ActiveValue::Set(BookingStatus::Booked);

        booking_am.update(self.db).await
    }

    pub async fn set_status(
        &self,
        booking: entity::booking::Model,
        status: BookingStatus,
    ) -> Result<entity::booking::Model, DbErr> {
        let mut booking_am = booking.into_active_model();
        booking_am.status = ActiveValue::Set(status);

        booking_am.update(self.db).await
    }

    /// Every row of an arena on a date, in any status
    pub async fn get_by_arena_and_date(
        &self,
        arena_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<entity::booking::Model>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::ArenaId.eq(arena_id))
            .filter(entity::booking::Column::Date.eq(date))
            .order_by_asc(entity::booking::Column::StartHour)
            .all(self.db)
            .await
    }

    /// A user's bookings with their arena, newest date first then by hour
    pub async fn get_by_user_with_arena(
        &self,
        user_id: i32,
    ) -> Result<Vec<(entity::booking::Model, Option<entity::arena::Model>)>, DbErr> {
        entity::prelude::Booking::find()
            .filter(entity::booking::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::Arena)
            .order_by_desc(entity::booking::Column::Date)
            .order_by_asc(entity::booking::Column::StartHour)
            .all(self.db)
            .await
    }

    /// All bookings matching the filter with their arena, newest date first then by hour
    pub async fn get_filtered_with_arena(
        &self,
        filter: BookingFilter,
    ) -> Result<Vec<(entity::booking::Model, Option<entity::arena::Model>)>, DbErr> {
        let mut query = entity::prelude::Booking::find();

        if let Some(arena_id) = filter.arena_id {
            query = query.filter(entity::booking::Column::ArenaId.eq(arena_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::booking::Column::Status.eq(status));
        }
        if let Some(date) = filter.date {
            query = query.filter(entity::booking::Column::Date.eq(date));
        }

        query
            .find_also_related(entity::prelude::Arena)
            .order_by_desc(entity::booking::Column::Date)
            .order_by_asc(entity::booking::Column::StartHour)
            .all(self.db)
            .await
    }

    /// Deletes a booking row
    ///
    /// Returns OK regardless of the booking existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, booking_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Booking::delete_by_id(booking_id)
            .exec(self.db)
            .await
    }

    /// Marks booked slots that ended before `today` at `current_hour` as completed
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated
    pub async fn complete_elapsed(
        &self,
        today: NaiveDate,
        current_hour: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Booking::update_many()
            .set(entity::booking::ActiveModel {
                status: ActiveValue::Set(BookingStatus::Completed),
                ..Default::default()
            })
            .filter(entity::booking::Column::Status.eq(BookingStatus::Booked))
            .filter(
                Condition::any()
                    .add(entity::booking::Column::Date.lt(today))
                    .add(
                        Condition::all()
                            .add(entity::booking::Column::Date.eq(today))
                            .add(entity::booking::Column::StartHour.lt(current_hour)),
                    ),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
