use chrono::NaiveTime;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// Opening hours for one weekday, both times `None` when closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayRule {
    pub day: i32,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
}

pub struct OpeningHoursRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OpeningHoursRepository<'a, C> {
    /// Creates a new instance of [`OpeningHoursRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Replaces all opening hours rules of an arena
    ///
    /// Should run inside the same transaction as the arena write so readers never observe an
    /// arena without rules.
    pub async fn replace_all(&self, arena_id: Uuid, rules: Vec<DayRule>) -> Result<(), DbErr> {
        entity::prelude::ArenaOpeningHours::delete_many()
            .filter(entity::arena_opening_hours::Column::ArenaId.eq(arena_id))
            .exec(self.db)
            .await?;

        if rules.is_empty() {
            return Ok(());
        }

        let models = rules
            .into_iter()
            .map(|rule| entity::arena_opening_hours::ActiveModel {
                arena_id: ActiveValue::Set(arena_id),
                day: ActiveValue::Set(rule.day),
                open_time: ActiveValue::Set(rule.open_time),
                close_time: ActiveValue::Set(rule.close_time),
                ..Default::default()
            });

        entity::prelude::ArenaOpeningHours::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Rules of one arena ordered by day
    pub async fn get_by_arena(
        &self,
        arena_id: Uuid,
    ) -> Result<Vec<entity::arena_opening_hours::Model>, DbErr> {
        entity::prelude::ArenaOpeningHours::find()
            .filter(entity::arena_opening_hours::Column::ArenaId.eq(arena_id))
            .order_by_asc(entity::arena_opening_hours::Column::Day)
            .all(self.db)
            .await
    }

    /// Rules of several arenas ordered by arena then day
    pub async fn get_by_arenas(
        &self,
        arena_ids: Vec<Uuid>,
    ) -> Result<Vec<entity::arena_opening_hours::Model>, DbErr> {
        entity::prelude::ArenaOpeningHours::find()
            .filter(entity::arena_opening_hours::Column::ArenaId.is_in(arena_ids))
            .order_by_asc(entity::arena_opening_hours::Column::ArenaId)
            .order_by_asc(entity::arena_opening_hours::Column::Day)
            .all(self.db)
            .await
    }

    /// The rule for one weekday, if any
    pub async fn get_for_day(
        &self,
        arena_id: Uuid,
        day: i32,
    ) -> Result<Option<entity::arena_opening_hours::Model>, DbErr> {
        entity::prelude::ArenaOpeningHours::find()
            .filter(entity::arena_opening_hours::Column::ArenaId.eq(arena_id))
            .filter(entity::arena_opening_hours::Column::Day.eq(day))
            .one(self.db)
            .await
    }
}
