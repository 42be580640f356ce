use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};

pub struct RegistrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationRepository<'a, C> {
    /// Creates a new instance of [`RegistrationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<entity::event_registration::Model, DbErr> {
        let registration = entity::event_registration::ActiveModel {
            event_id: ActiveValue::Set(event_id),
            user_id: ActiveValue::Set(user_id),
            registered_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        registration.insert(self.db).await
    }

    pub async fn get(
        &self,
        event_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::event_registration::Model>, DbErr> {
        entity::prelude::EventRegistration::find()
            .filter(entity::event_registration::Column::EventId.eq(event_id))
            .filter(entity::event_registration::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn delete(&self, registration_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::EventRegistration::delete_by_id(registration_id)
            .exec(self.db)
            .await
    }

    pub async fn count_for_event(&self, event_id: i32) -> Result<u64, DbErr> {
        entity::prelude::EventRegistration::find()
            .filter(entity::event_registration::Column::EventId.eq(event_id))
            .count(self.db)
            .await
    }

    /// Registration counts keyed by event ID
    ///
    /// Events without registrations are absent from the map.
    pub async fn count_for_events(&self, event_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::EventRegistration::find()
            .select_only()
            .column(entity::event_registration::Column::EventId)
            .column_as(entity::event_registration::Column::Id.count(), "count")
            .filter(entity::event_registration::Column::EventId.is_in(event_ids))
            .group_by(entity::event_registration::Column::EventId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(event_id, count)| (event_id, count.max(0) as u64))
            .collect())
    }

    /// IDs of the given events the user is registered for
    pub async fn get_event_ids_for_user(
        &self,
        user_id: i32,
        event_ids: Vec<i32>,
    ) -> Result<Vec<i32>, DbErr> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::EventRegistration::find()
            .select_only()
            .column(entity::event_registration::Column::EventId)
            .filter(entity::event_registration::Column::UserId.eq(user_id))
            .filter(entity::event_registration::Column::EventId.is_in(event_ids))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// A user's registrations with their event
    pub async fn get_by_user_with_event(
        &self,
        user_id: i32,
    ) -> Result<
        Vec<(
            entity::event_registration::Model,
            Option<entity::event::Model>,
        )>,
        DbErr,
    > {
        entity::prelude::EventRegistration::find()
            .filter(entity::event_registration::Column::UserId.eq(user_id))
            .find_also_related(entity::prelude::Event)
            .all(self.db)
            .await
    }
}
