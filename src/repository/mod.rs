//! Repository layer: read-only access to the schedule configuration tables

pub mod schedules;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{engine::ConfigSnapshot, error::AppResult};

/// Where configuration snapshots come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Every record that may apply to a date of `[from, to]`: active periods and
    /// dated closures overlapping the range, all active recurring closures, and the
    /// overrides overlapping the range.
    async fn load_snapshot(&self, from: NaiveDate, to: NaiveDate) -> AppResult<ConfigSnapshot>;

    /// Check the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub schedules: schedules::SchedulesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl ScheduleSource for Repository {
    async fn load_snapshot(&self, from: NaiveDate, to: NaiveDate) -> AppResult<ConfigSnapshot> {
        let (periods, closures, overrides) = tokio::try_join!(
            self.schedules.list_periods(from, to),
            self.schedules.list_closures(from, to),
            self.schedules.list_overrides(from, to),
        )?;

        tracing::debug!(
            "Loaded snapshot {}..{}: {} periods, {} closures, {} overrides",
            from,
            to,
            periods.len(),
            closures.len(),
            overrides.len()
        );

        Ok(ConfigSnapshot {
            periods,
            closures,
            overrides,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
