use chrono::{NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::{Activity, EventLevel};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn event(&self) -> EventFixtures<'_> {
        EventFixtures { context: self }
    }
}

pub struct EventFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> EventFixtures<'a> {
    /// Insert an active ice skating event running 10:00 - 12:00.
    pub async fn insert_event(
        &self,
        slug: &str,
        date: NaiveDate,
        max_participants: Option<i32>,
    ) -> Result<entity::event::Model, TestError> {
        self.insert_event_in_category(slug, date, max_participants, Activity::IceSkating)
            .await
    }

    pub async fn insert_event_in_category(
        &self,
        slug: &str,
        date: NaiveDate,
        max_participants: Option<i32>,
        category: Activity,
    ) -> Result<entity::event::Model, TestError> {
        Ok(
            entity::prelude::Event::insert(entity::event::ActiveModel {
                slug: ActiveValue::Set(slug.to_string()),
                name: ActiveValue::Set(slug.replace('-', " ")),
                description: ActiveValue::Set("Open session on the main rink".to_string()),
                category: ActiveValue::Set(category),
                level: ActiveValue::Set(EventLevel::Beginner),
                date: ActiveValue::Set(date),
                start_time: ActiveValue::Set(
                    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
                ),
                end_time: ActiveValue::Set(
                    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
                ),
                location: ActiveValue::Set("Main Rink".to_string()),
                registration_fee: ActiveValue::Set(0),
                max_participants: ActiveValue::Set(max_participants),
                is_active: ActiveValue::Set(true),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Register a user for an event.
    pub async fn insert_registration(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<entity::event_registration::Model, TestError> {
        Ok(entity::prelude::EventRegistration::insert(
            entity::event_registration::ActiveModel {
                event_id: ActiveValue::Set(event_id),
                user_id: ActiveValue::Set(user_id),
                registered_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.context.db)
        .await?)
    }
}
