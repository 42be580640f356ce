//! Declarative test builder.
//!
//! Tables are queued by the `with_*` methods and created in dependency order by
//! [`TestBuilder::build`], followed by the composite unique indexes the migrations define.

use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{error::TestError, TestContext};

/// Builder for test environments backed by an in-memory SQLite database.
#[derive(Default)]
pub struct TestBuilder {
    include_user_tables: bool,
    include_arena_tables: bool,
    include_booking_tables: bool,
    include_event_tables: bool,
    include_forum_tables: bool,
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Create a new builder with no tables configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the `rink_user` table.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Add the arena and opening hours tables.
    pub fn with_arena_tables(mut self) -> Self {
        self.include_arena_tables = true;
        self
    }

    /// Add the booking table along with the user and arena tables it references.
    pub fn with_booking_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_arena_tables = true;
        self.include_booking_tables = true;
        self
    }

    /// Add the event and registration tables along with the user table.
    pub fn with_event_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_event_tables = true;
        self
    }

    /// Add the forum post, reply and vote tables along with the user table.
    pub fn with_forum_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_forum_tables = true;
        self
    }

    /// Add a custom entity table, created after the standard table groups.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rink_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), rink_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(RinkUser)
    ///     .with_table(Arena)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Create all configured tables and indexes.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test environment ready for use
    /// - `Err(TestError::DbErr)` - Table or index creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);

        let mut tables = Vec::new();
        let mut indexes = Vec::new();

        if self.include_user_tables {
            tables.push(schema.create_table_from_entity(entity::prelude::RinkUser));
        }

        if self.include_arena_tables {
            tables.extend([
                schema.create_table_from_entity(entity::prelude::Arena),
                schema.create_table_from_entity(entity::prelude::ArenaOpeningHours),
            ]);
            indexes.push(opening_hours_day_index());
        }

        if self.include_booking_tables {
            tables.push(schema.create_table_from_entity(entity::prelude::Booking));
            indexes.push(booking_slot_index());
        }

        if self.include_event_tables {
            tables.extend([
                schema.create_table_from_entity(entity::prelude::Event),
                schema.create_table_from_entity(entity::prelude::EventRegistration),
            ]);
            indexes.push(registration_index());
        }

        if self.include_forum_tables {
            tables.extend([
                schema.create_table_from_entity(entity::prelude::ForumPost),
                schema.create_table_from_entity(entity::prelude::ForumReply),
                schema.create_table_from_entity(entity::prelude::ForumVote),
            ]);
            indexes.extend(vote_indexes());
        }

        tables.extend(self.tables);

        context.with_tables(tables).await?;
        context.with_indexes(indexes).await?;

        Ok(context)
    }
}

fn opening_hours_day_index() -> IndexCreateStatement {
    use entity::arena_opening_hours::{Column, Entity};

    Index::create()
        .name("idx-arena_opening_hours-arena_id-day")
        .table(Entity)
        .col(Column::ArenaId)
        .col(Column::Day)
        .unique()
        .to_owned()
}

fn booking_slot_index() -> IndexCreateStatement {
    use entity::booking::{Column, Entity};

    Index::create()
        .name("idx-booking-arena_id-date-start_hour")
        .table(Entity)
        .col(Column::ArenaId)
        .col(Column::Date)
        .col(Column::StartHour)
        .unique()
        .to_owned()
}

fn registration_index() -> IndexCreateStatement {
    use entity::event_registration::{Column, Entity};

    Index::create()
        .name("idx-event_registration-user_id-event_id")
        .table(Entity)
        .col(Column::UserId)
        .col(Column::EventId)
        .unique()
        .to_owned()
}

fn vote_indexes() -> [IndexCreateStatement; 2] {
    use entity::forum_vote::{Column, Entity};

    [
        Index::create()
            .name("idx-forum_vote-voter-post_id")
            .table(Entity)
            .col(Column::Voter)
            .col(Column::PostId)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx-forum_vote-voter-reply_id")
            .table(Entity)
            .col(Column::Voter)
            .col(Column::ReplyId)
            .unique()
            .to_owned(),
    ]
}
