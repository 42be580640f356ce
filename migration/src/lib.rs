pub use sea_orm_migration::prelude::*;

mod m20251101_000001_rink_user;
mod m20251101_000002_arena;
mod m20251101_000003_arena_opening_hours;
mod m20251101_000004_booking;
mod m20251101_000005_event;
mod m20251101_000006_event_registration;
mod m20251101_000007_forum_post;
mod m20251101_000008_forum_reply;
mod m20251101_000009_forum_vote;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_rink_user::Migration),
            Box::new(m20251101_000002_arena::Migration),
            Box::new(m20251101_000003_arena_opening_hours::Migration),
            Box::new(m20251101_000004_booking::Migration),
            Box::new(m20251101_000005_event::Migration),
            Box::new(m20251101_000006_event_registration::Migration),
            Box::new(m20251101_000007_forum_post::Migration),
            Box::new(m20251101_000008_forum_reply::Migration),
            Box::new(m20251101_000009_forum_vote::Migration),
        ]
    }
}
