use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{Activity, BookingStatus};
use sea_orm::{ActiveValue, EntityTrait};
use uuid::Uuid;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn booking(&self) -> BookingFixtures<'_> {
        BookingFixtures { context: self }
    }
}

pub struct BookingFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> BookingFixtures<'a> {
    /// Insert a booking row for a slot with the given status.
    pub async fn insert_booking(
        &self,
        arena_id: Uuid,
        user_id: i32,
        date: NaiveDate,
        start_hour: i32,
        status: BookingStatus,
    ) -> Result<entity::booking::Model, TestError> {
        Ok(
            entity::prelude::Booking::insert(entity::booking::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                arena_id: ActiveValue::Set(arena_id),
                user_id: ActiveValue::Set(user_id),
                date: ActiveValue::Set(date),
                start_hour: ActiveValue::Set(start_hour),
                booked_at: ActiveValue::Set(Utc::now().naive_utc()),
                status: ActiveValue::Set(status),
                activity: ActiveValue::Set(Some(Activity::IceSkating)),
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
