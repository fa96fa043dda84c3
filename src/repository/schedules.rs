//! Schedules repository (periods, closures, overrides)

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        closure::ClosureRow, day_override::OverrideRow, period::PeriodRow, Closure, DayOverride,
        Period,
    },
};

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Active periods overlapping `[from, to]`
    pub async fn list_periods(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Period>> {
        let rows = sqlx::query_as::<_, PeriodRow>(
            r#"
            SELECT * FROM schedule_periods
            WHERE active AND start_date <= $2 AND end_date >= $1
            ORDER BY priority DESC, id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Period::try_from).collect()
    }

    /// Active closures that may apply to `[from, to]`. Recurring closures carry no
    /// year, so all of them are returned.
    pub async fn list_closures(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Closure>> {
        let rows = sqlx::query_as::<_, ClosureRow>(
            r#"
            SELECT * FROM schedule_closures
            WHERE active
              AND (closure_type = 'recurring'
                   OR (start_date <= $2 AND end_date >= $1))
            ORDER BY id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Closure::try_from).collect()
    }

    /// Overrides overlapping `[from, to]`
    pub async fn list_overrides(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<DayOverride>> {
        let rows = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT * FROM schedule_overrides
            WHERE date_from <= $2 AND date_to >= $1
            ORDER BY priority DESC, id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DayOverride::try_from).collect()
    }
}
