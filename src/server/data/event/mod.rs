//! Event and registration repositories.

pub mod registration;

use chrono::{NaiveDate, NaiveTime, Utc};
use entity::sea_orm_active_enums::{Activity, EventLevel};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

pub use registration::RegistrationRepository;

/// Validated fields of a new event.
#[derive(Clone, Debug)]
pub struct EventParams {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: Activity,
    pub level: EventLevel,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub registration_fee: i64,
    pub max_participants: Option<i32>,
}

pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    /// Creates a new instance of [`EventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: EventParams) -> Result<entity::event::Model, DbErr> {
        let event = entity::event::ActiveModel {
            slug: ActiveValue::Set(params.slug),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            level: ActiveValue::Set(params.level),
            date: ActiveValue::Set(params.date),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(params.end_time),
            location: ActiveValue::Set(params.location),
            registration_fee: ActiveValue::Set(params.registration_fee),
            max_participants: ActiveValue::Set(params.max_participants),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        event.insert(self.db).await
    }

    pub async fn get(&self, event_id: i32) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await
    }

    /// Active event by slug
    pub async fn get_active_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::Slug.eq(slug))
            .filter(entity::event::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Active event by slug read with `SELECT ... FOR UPDATE`
    ///
    /// Serializes registrations for the same event while the surrounding transaction is open.
    pub async fn get_active_by_slug_for_update(
        &self,
        slug: &str,
    ) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::Slug.eq(slug))
            .filter(entity::event::Column::IsActive.eq(true))
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Whether any event, active or not, already uses the slug
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Event::find()
            .filter(entity::event::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active events on or after `today`, ordered by date then start time
    pub async fn get_upcoming(
        &self,
        today: NaiveDate,
        category: Option<Activity>,
        level: Option<EventLevel>,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        let mut query = entity::prelude::Event::find()
            .filter(entity::event::Column::IsActive.eq(true))
            .filter(entity::event::Column::Date.gte(today));

        if let Some(category) = category {
            query = query.filter(entity::event::Column::Category.eq(category));
        }
        if let Some(level) = level {
            query = query.filter(entity::event::Column::Level.eq(level));
        }

        query
            .order_by_asc(entity::event::Column::Date)
            .order_by_asc(entity::event::Column::StartTime)
            .all(self.db)
            .await
    }

    /// Other upcoming active events of the same category
    pub async fn get_related(
        &self,
        event: &entity::event::Model,
        today: NaiveDate,
        limit: u64,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::IsActive.eq(true))
            .filter(entity::event::Column::Category.eq(event.category))
            .filter(entity::event::Column::Date.gte(today))
            .filter(entity::event::Column::Id.ne(event.id))
            .order_by_asc(entity::event::Column::Date)
            .order_by_asc(entity::event::Column::StartTime)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Deletes an event, registrations cascade
    ///
    /// Returns OK regardless of the event existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, event_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Event::delete_by_id(event_id)
            .exec(self.db)
            .await
    }
}
