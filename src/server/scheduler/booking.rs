use chrono::{FixedOffset, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{error::Error, service::booking::BookingService};

/// Every 15 minutes, on the minute
pub const COMPLETE_ELAPSED_CRON: &str = "0 */15 * * * *";

/// Marks booked slots whose hour has passed as completed
pub async fn complete_elapsed_bookings(
    db: DatabaseConnection,
    utc_offset: FixedOffset,
) -> Result<u64, Error> {
    BookingService::new(&db, utc_offset)
        .complete_elapsed_bookings(Utc::now())
        .await
}
