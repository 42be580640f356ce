//! Arena and opening hours repositories.

pub mod opening_hours;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryOrder,
};
use uuid::Uuid;

pub use opening_hours::{DayRule, OpeningHoursRepository};

/// Validated arena fields written on create and update.
#[derive(Clone, Debug)]
pub struct ArenaParams {
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub location: String,
    pub img_url: Option<String>,
    pub opening_hours_text: Option<String>,
    pub google_maps_url: Option<String>,
}

pub struct ArenaRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArenaRepository<'a, C> {
    /// Creates a new instance of [`ArenaRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new arena with a random UUID
    pub async fn create(&self, params: ArenaParams) -> Result<entity::arena::Model, DbErr> {
        let arena = entity::arena::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            capacity: ActiveValue::Set(params.capacity),
            location: ActiveValue::Set(params.location),
            img_url: ActiveValue::Set(params.img_url),
            opening_hours_text: ActiveValue::Set(params.opening_hours_text),
            google_maps_url: ActiveValue::Set(params.google_maps_url),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        arena.insert(self.db).await
    }

    /// Replaces every editable field of an existing arena
    pub async fn update(
        &self,
        arena: entity::arena::Model,
        params: ArenaParams,
    ) -> Result<entity::arena::Model, DbErr> {
        let mut arena_am = arena.into_active_model();
        arena_am.name = ActiveValue::Set(params.name);
        arena_am.description = ActiveValue::Set(params.description);
        arena_am.capacity = ActiveValue::Set(params.capacity);
        arena_am.location = ActiveValue::Set(params.location);
        arena_am.img_url = ActiveValue::Set(params.img_url);
        arena_am.opening_hours_text = ActiveValue::Set(params.opening_hours_text);
        arena_am.google_maps_url = ActiveValue::Set(params.google_maps_url);

        arena_am.update(self.db).await
    }

    pub async fn get(&self, arena_id: Uuid) -> Result<Option<entity::arena::Model>, DbErr> {
        entity::prelude::Arena::find_by_id(arena_id)
            .one(self.db)
            .await
    }

    /// All arenas ordered by name
    pub async fn get_all(&self) -> Result<Vec<entity::arena::Model>, DbErr> {
        entity::prelude::Arena::find()
            .order_by_asc(entity::arena::Column::Name)
            .all(self.db)
            .await
    }

    /// Deletes an arena, cascading to its opening hours and bookings
    ///
    /// Returns OK regardless of the arena existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, arena_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::Arena::delete_by_id(arena_id)
            .exec(self.db)
            .await
    }
}
