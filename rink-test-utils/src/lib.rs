//! Shared test fixtures for the rink workspace.
//!
//! Tests configure an environment with [`TestBuilder`], which creates the requested tables in an
//! in-memory SQLite database and returns a [`TestContext`] holding the connection and a session
//! backed by a `MemoryStore`. Fixture helpers on the context insert users, arenas, bookings,
//! events and forum content.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::{arena::weekly_hours, TEST_PASSWORD},
        TestBuilder, TestContext, TestError,
    };
}
