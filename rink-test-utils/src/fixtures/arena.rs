use chrono::{NaiveTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};
use uuid::Uuid;

use crate::{error::TestError, TestContext};

/// Opening hours for one weekday, `None` when closed.
pub type DayHours = (i32, Option<(NaiveTime, NaiveTime)>);

/// The same opening hours on all seven days.
pub fn weekly_hours(open_hour: u32, close_hour: u32) -> Vec<DayHours> {
    let open = NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap_or(NaiveTime::MIN);
    let close = NaiveTime::from_hms_opt(close_hour, 0, 0).unwrap_or(NaiveTime::MIN);

    (0..7).map(|day| (day, Some((open, close)))).collect()
}

impl TestContext {
    pub fn arena(&self) -> ArenaFixtures<'_> {
        ArenaFixtures { context: self }
    }
}

pub struct ArenaFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> ArenaFixtures<'a> {
    /// Insert an arena open 08:00 - 22:00 every day.
    pub async fn insert_arena(&self, name: &str) -> Result<entity::arena::Model, TestError> {
        self.insert_arena_with_hours(name, weekly_hours(8, 22)).await
    }

    /// Insert an arena with the given opening hours.
    ///
    /// Days missing from `hours` get no rule at all.
    pub async fn insert_arena_with_hours(
        &self,
        name: &str,
        hours: Vec<DayHours>,
    ) -> Result<entity::arena::Model, TestError> {
        let arena = entity::prelude::Arena::insert(entity::arena::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(format!("{} description", name)),
            capacity: ActiveValue::Set(100),
            location: ActiveValue::Set("Main Street 1".to_string()),
            img_url: ActiveValue::Set(None),
            opening_hours_text: ActiveValue::Set(None),
            google_maps_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        })
        .exec_with_returning(&self.context.db)
        .await?;

        for (day, times) in hours {
            entity::prelude::ArenaOpeningHours::insert(entity::arena_opening_hours::ActiveModel {
                arena_id: ActiveValue::Set(arena.id),
                day: ActiveValue::Set(day),
                open_time: ActiveValue::Set(times.map(|(open, _)| open)),
                close_time: ActiveValue::Set(times.map(|(_, close)| close)),
                ..Default::default()
            })
            .exec(&self.context.db)
            .await?;
        }

        Ok(arena)
    }
}
