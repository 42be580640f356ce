//! Arena listing and admin management.
//!
//! Every arena carries exactly seven opening hours rules, one per weekday. Admin forms may omit
//! days; omitted days are stored as closed. Arena fields and rules are always written in the
//! same transaction.

mod form;


use std::collections::HashMap;

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::arena::{ArenaDto, ArenaFormDto, OpeningHoursDto},
    server::{
        data::arena::{ArenaRepository, OpeningHoursRepository},
        error::{arena::ArenaError, Error},
        model::db::{ArenaModel, OpeningHoursModel},
        util::time::format_hhmm,
    },
};

pub use form::validate_arena_form;

pub struct ArenaService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArenaService<'a> {
    /// Creates a new instance of [`ArenaService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All arenas ordered by name with their opening hours
    pub async fn list_arenas(&self) -> Result<Vec<ArenaDto>, Error> {
        let arenas = ArenaRepository::new(self.db).get_all().await?;
        let arena_ids = arenas.iter().map(|a| a.id).collect();

        let mut rules_by_arena: HashMap<Uuid, Vec<OpeningHoursModel>> = HashMap::new();
        for rule in OpeningHoursRepository::new(self.db)
            .get_by_arenas(arena_ids)
            .await?
        {
            rules_by_arena.entry(rule.arena_id).or_default().push(rule);
        }

        Ok(arenas
            .into_iter()
            .map(|arena| {
                let rules = rules_by_arena.remove(&arena.id).unwrap_or_default();
                arena_dto(arena, rules)
            })
            .collect())
    }

    pub async fn get_arena(&self, arena_id: Uuid) -> Result<ArenaDto, Error> {
        let Some(arena) = ArenaRepository::new(self.db).get(arena_id).await? else {
            return Err(ArenaError::NotFound(arena_id).into());
        };

        let rules = OpeningHoursRepository::new(self.db)
            .get_by_arena(arena_id)
            .await?;

        Ok(arena_dto(arena, rules))
    }

    /// Validates the form and creates the arena with all seven rules
    pub async fn create_arena(&self, form: ArenaFormDto) -> Result<ArenaDto, Error> {
        let (params, rules) = validate_arena_form(&form)?;

        let txn = self.db.begin().await?;

        let arena = ArenaRepository::new(&txn).create(params).await?;
        OpeningHoursRepository::new(&txn)
            .replace_all(arena.id, rules)
            .await?;

        txn.commit().await?;

        tracing::info!("Created arena {:?} with ID {}", arena.name, arena.id);

        self.get_arena(arena.id).await
    }

    /// Validates the form and replaces the arena fields and all seven rules
    pub async fn update_arena(&self, arena_id: Uuid, form: ArenaFormDto) -> Result<ArenaDto, Error> {
        let (params, rules) = validate_arena_form(&form)?;

        let txn = self.db.begin().await?;

        let arena_repo = ArenaRepository::new(&txn);
        let Some(arena) = arena_repo.get(arena_id).await? else {
            return Err(ArenaError::NotFound(arena_id).into());
        };
        arena_repo.update(arena, params).await?;
        OpeningHoursRepository::new(&txn)
            .replace_all(arena_id, rules)
            .await?;

        txn.commit().await?;

        self.get_arena(arena_id).await
    }

    /// Deletes an arena, its rules and bookings cascade
    pub async fn delete_arena(&self, arena_id: Uuid) -> Result<(), Error> {
        let result = ArenaRepository::new(self.db).delete(arena_id).await?;

        if result.rows_affected == 0 {
            return Err(ArenaError::NotFound(arena_id).into());
        }

        tracing::info!("Deleted arena {}", arena_id);

        Ok(())
    }
}

pub fn arena_dto(arena: ArenaModel, rules: Vec<OpeningHoursModel>) -> ArenaDto {
    ArenaDto {
        id: arena.id,
        name: arena.name,
        description: arena.description,
        capacity: arena.capacity,
        location: arena.location,
        img_url: arena.img_url,
        opening_hours_text: arena.opening_hours_text,
        google_maps_url: arena.google_maps_url,
        opening_hours: rules
            .into_iter()
            .map(|rule| OpeningHoursDto {
                day: rule.day,
                open_time: rule.open_time.map(format_hhmm),
                close_time: rule.close_time.map(format_hhmm),
            })
            .collect(),
    }
}
