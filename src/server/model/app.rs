use chrono::{FixedOffset, Offset, Utc};
use sea_orm::DatabaseConnection;

/// Offset applied when none is configured, UTC+7.
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 7 * 3600;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Local offset used for "today" and "now" in booking and event rules
    pub utc_offset: FixedOffset,
}

impl AppState {
    pub fn new(db: DatabaseConnection, utc_offset: FixedOffset) -> Self {
        Self { db, utc_offset }
    }
}

impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        let utc_offset =
            FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());

        Self { db, utc_offset }
    }
}
