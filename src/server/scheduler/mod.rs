//! Scheduler for periodic maintenance tasks.
//!
//! Wraps a `tokio-cron-scheduler` [`JobScheduler`] holding the database connection and the
//! configured local offset. Each job is an async function over those two values that reports how
//! many rows it touched, which is logged after every run.

use std::sync::Arc;

use chrono::FixedOffset;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::error::Error;

pub mod booking;

/// Job scheduler for background booking maintenance.
pub struct Scheduler {
    db: DatabaseConnection,
    utc_offset: FixedOffset,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, utc_offset: FixedOffset) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            db,
            utc_offset,
            sched,
        })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Completion of elapsed bookings
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(
            booking::COMPLETE_ELAPSED_CRON,
            "elapsed booking completion",
            booking::complete_elapsed_bookings,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// # Arguments
    /// - `cron` - Cron expression with seconds, e.g. `"0 */15 * * * *"`
    /// - `name` - Human-readable name for log messages
    /// - `function` - Async job returning the number of rows it changed
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, FixedOffset) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let utc_offset = self.utc_offset;
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db, utc_offset).await {
                        Ok(count) => tracing::debug!("Ran {} job, {} row(s) changed", name, count),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
