//! Event listing, registration and admin management.
//!
//! Registration locks the event row for the length of the transaction so the participant count
//! read and the insert cannot interleave with another registration for the same event.

mod form;


use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::{
        booking::ActivityDto,
        event::{EventDetailDto, EventDto, EventFormDto, EventLevelDto, MyEventsDto, RegistrationDto},
    },
    server::{
        data::event::{EventParams, EventRepository, RegistrationRepository},
        error::{event::EventError, Error},
        model::db::EventModel,
        util::time::{format_hhmm, local_datetime},
    },
};

pub use form::validate_event_form;

const RELATED_EVENTS_LIMIT: u64 = 3;
const SLUG_INSERT_ATTEMPTS: usize = 5;

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
    utc_offset: FixedOffset,
}

impl<'a> EventService<'a> {
    /// Creates a new instance of [`EventService`]
    pub fn new(db: &'a DatabaseConnection, utc_offset: FixedOffset) -> Self {
        Self { db, utc_offset }
    }

    fn today(&self) -> NaiveDate {
        local_datetime(Utc::now(), self.utc_offset).date()
    }

    /// Upcoming active events, optionally narrowed by category and level
    pub async fn list_events(
        &self,
        category: Option<ActivityDto>,
        level: Option<EventLevelDto>,
    ) -> Result<Vec<EventDto>, Error> {
        let events = EventRepository::new(self.db)
            .get_upcoming(self.today(), category.map(Into::into), level.map(Into::into))
            .await?;

        self.event_dtos(events).await
    }

    /// Active event detail as seen by `user_id`
    pub async fn get_event(
        &self,
        slug: &str,
        user_id: Option<i32>,
    ) -> Result<EventDetailDto, Error> {
        let event_repo = EventRepository::new(self.db);

        let Some(event) = event_repo.get_active_by_slug(slug).await? else {
            return Err(EventError::NotFound(slug.to_string()).into());
        };

        let is_registered = match user_id {
            Some(user_id) => RegistrationRepository::new(self.db)
                .get(event.id, user_id)
                .await?
                .is_some(),
            None => false,
        };

        let related = event_repo
            .get_related(&event, self.today(), RELATED_EVENTS_LIMIT)
            .await?;

        let mut dtos = self.event_dtos(vec![event]).await?;
        let event = dtos.pop().ok_or_else(|| {
            Error::InternalError(format!("Event {:?} disappeared while building its response", slug))
        })?;

        Ok(EventDetailDto {
            event,
            is_registered,
            related_events: self.event_dtos(related).await?,
        })
    }

    /// Registers a user for an upcoming event with free capacity
    ///
    /// # Returns
    /// - `Ok(EventDetailDto)` - Event detail after registering
    /// - `Err(Error::EventError(EventError::NotFound))` - No active event with the slug
    /// - `Err(Error::EventError(EventError::PastEvent))` - The event date is before today
    /// - `Err(Error::EventError(EventError::AlreadyRegistered))` - The user is registered already
    /// - `Err(Error::EventError(EventError::EventFull))` - `max_participants` is reached
    pub async fn register(&self, slug: &str, user_id: i32) -> Result<EventDetailDto, Error> {
        let txn = self.db.begin().await?;

        let Some(event) = EventRepository::new(&txn)
            .get_active_by_slug_for_update(slug)
            .await?
        else {
            return Err(EventError::NotFound(slug.to_string()).into());
        };

        if event.date < self.today() {
            return Err(EventError::PastEvent(slug.to_string()).into());
        }

        let registration_repo = RegistrationRepository::new(&txn);
        if registration_repo.get(event.id, user_id).await?.is_some() {
            return Err(EventError::AlreadyRegistered {
                slug: slug.to_string(),
                user_id,
            }
            .into());
        }

        if let Some(max_participants) = event.max_participants {
            let registered = registration_repo.count_for_event(event.id).await?;
            if registered >= max_participants.max(0) as u64 {
                return Err(EventError::EventFull(slug.to_string()).into());
            }
        }

        if let Err(err) = registration_repo.create(event.id, user_id).await {
            if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                return Err(EventError::AlreadyRegistered {
                    slug: slug.to_string(),
                    user_id,
                }
                .into());
            }
            return Err(err.into());
        }

        txn.commit().await?;

        tracing::debug!("User ID {} registered for event {:?}", user_id, slug);

        self.get_event(slug, Some(user_id)).await
    }

    /// Removes the user's registration for an active event
    pub async fn cancel_registration(&self, slug: &str, user_id: i32) -> Result<(), Error> {
        let Some(event) = EventRepository::new(self.db)
            .get_active_by_slug(slug)
            .await?
        else {
            return Err(EventError::NotFound(slug.to_string()).into());
        };

        let registration_repo = RegistrationRepository::new(self.db);
        let Some(registration) = registration_repo.get(event.id, user_id).await? else {
            return Err(EventError::NotRegistered {
                slug: slug.to_string(),
                user_id,
            }
            .into());
        };

        registration_repo.delete(registration.id).await?;

        tracing::debug!("User ID {} cancelled registration for event {:?}", user_id, slug);

        Ok(())
    }

    /// A user's registrations split into upcoming (soonest first) and past (latest first)
    pub async fn my_events(&self, user_id: i32) -> Result<MyEventsDto, Error> {
        let rows = RegistrationRepository::new(self.db)
            .get_by_user_with_event(user_id)
            .await?;

        let (registrations, events): (Vec<_>, Vec<_>) = rows
            .into_iter()
            .filter_map(|(registration, event)| event.map(|event| (registration, event)))
            .unzip();

        let event_dtos = self.event_dtos(events).await?;
        let today = self.today();

        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = registrations
            .into_iter()
            .zip(event_dtos)
            .map(|(registration, event)| RegistrationDto {
                event,
                registered_at: registration.registered_at,
            })
            .partition(|r| r.event.date >= today);

        upcoming.sort_by(|a, b| {
            (a.event.date, &a.event.start_time).cmp(&(b.event.date, &b.event.start_time))
        });
        past.sort_by(|a, b| {
            (b.event.date, &b.event.start_time).cmp(&(a.event.date, &a.event.start_time))
        });

        Ok(MyEventsDto { upcoming, past })
    }

    /// Validates the form and creates an event with a unique slug
    ///
    /// The slug comes from the name; on collision `-2`, `-3`, ... is appended. A slug taken
    /// between the check and the insert moves on to the next suffix.
    pub async fn create_event(&self, form: EventFormDto) -> Result<EventDto, Error> {
        let mut params = validate_event_form(&form)?;

        let event_repo = EventRepository::new(self.db);
        let base_slug = params.slug.clone();
        let mut suffix = 2;
        while event_repo.slug_exists(&params.slug).await? {
            params.slug = format!("{}-{}", base_slug, suffix);
            suffix += 1;
        }

        let event = insert_with_unique_slug(&event_repo, params, &base_slug, suffix).await?;

        tracing::info!("Created event {:?} with ID {}", event.slug, event.id);

        let mut dtos = self.event_dtos(vec![event]).await?;
        dtos.pop().ok_or_else(|| {
            Error::InternalError("Event disappeared while building its response".to_string())
        })
    }

    pub async fn delete_event(&self, event_id: i32) -> Result<(), Error> {
        let result = EventRepository::new(self.db).delete(event_id).await?;

        if result.rows_affected == 0 {
            return Err(EventError::IdNotFound(event_id).into());
        }

        tracing::info!("Deleted event ID {}", event_id);

        Ok(())
    }

    async fn event_dtos(&self, events: Vec<EventModel>) -> Result<Vec<EventDto>, Error> {
        let event_ids = events.iter().map(|e| e.id).collect();
        let counts: HashMap<i32, u64> = RegistrationRepository::new(self.db)
            .count_for_events(event_ids)
            .await?;

        Ok(events
            .into_iter()
            .map(|event| {
                let registered_count = counts.get(&event.id).copied().unwrap_or(0);
                event_dto(event, registered_count)
            })
            .collect())
    }
}

fn event_dto(event: EventModel, registered_count: u64) -> EventDto {
    let is_full = event
        .max_participants
        .is_some_and(|max| registered_count >= max.max(0) as u64);

    EventDto {
        id: event.id,
        slug: event.slug,
        name: event.name,
        description: event.description,
        category: event.category.into(),
        level: event.level.into(),
        date: event.date,
        start_time: format_hhmm(event.start_time),
        end_time: format_hhmm(event.end_time),
        location: event.location,
        registration_fee: event.registration_fee,
        max_participants: event.max_participants,
        registered_count,
        is_full,
    }
}

/// Inserts the event, moving to `{base_slug}-{suffix}` and up while the slug is taken
async fn insert_with_unique_slug(
    event_repo: &EventRepository<'_, DatabaseConnection>,
    mut params: EventParams,
    base_slug: &str,
    mut suffix: u32,
) -> Result<EventModel, Error> {
    for _ in 0..SLUG_INSERT_ATTEMPTS {
        match event_repo.create(params.clone()).await {
            Ok(event) => return Ok(event),
            Err(err) => {
                if !matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(err.into());
                }
                tracing::debug!("Event slug {:?} was taken concurrently", params.slug);
                params.slug = format!("{}-{}", base_slug, suffix);
                suffix += 1;
            }
        }
    }

    Err(Error::InternalError(format!(
        "No free slug for event {:?} after {} attempts",
        base_slug, SLUG_INSERT_ATTEMPTS
    )))
}
