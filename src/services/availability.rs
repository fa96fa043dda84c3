//! Availability service: loads a configuration snapshot and queries the engine

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;

use crate::{
    calendar::iso_week_bounds,
    config::AvailabilityConfig,
    engine::{range, slots, AvailabilityEngine, ConfigSnapshot},
    error::AppResult,
    models::{EffectiveDay, WeekOverview},
    repository::ScheduleSource,
};

#[derive(Clone)]
pub struct AvailabilityService {
    source: Arc<dyn ScheduleSource>,
    limits: AvailabilityConfig,
}

impl AvailabilityService {
    pub fn new(source: Arc<dyn ScheduleSource>, limits: AvailabilityConfig) -> Self {
        Self { source, limits }
    }

    /// Check the configuration store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.source.ping().await
    }

    async fn snapshot(&self, from: NaiveDate, to: NaiveDate) -> AppResult<ConfigSnapshot> {
        self.source.load_snapshot(from, to).await
    }

    fn engine<'a>(&self, snapshot: &'a ConfigSnapshot) -> AvailabilityEngine<'a> {
        AvailabilityEngine::new(snapshot, &self.limits)
    }

    /// Effective day for a single date
    pub async fn effective_day(&self, date: NaiveDate) -> AppResult<EffectiveDay> {
        let snapshot = self.snapshot(date, date).await?;
        self.engine(&snapshot).effective_day(date)
    }

    /// Effective days for `[from, to]`, ascending
    pub async fn effective_range(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<EffectiveDay>> {
        range::check_range(from, to, self.limits.max_range_days)?;
        let snapshot = self.snapshot(from, to).await?;
        let days = self.engine(&snapshot).effective_range(from, to)?;
        Ok(days.into_values().collect())
    }

    /// Bookable start times for a date
    pub async fn reservable_slots(
        &self,
        date: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<Vec<NaiveTime>> {
        slots::validate_granularity(granularity_minutes)?;
        let snapshot = self.snapshot(date, date).await?;
        self.engine(&snapshot).reservable_slots(date, granularity_minutes)
    }

    /// Bookable start times for every date of `[from, to]`
    pub async fn reservable_slots_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<IndexMap<NaiveDate, Vec<NaiveTime>>> {
        slots::validate_granularity(granularity_minutes)?;
        range::check_range(from, to, self.limits.max_range_days)?;
        let snapshot = self.snapshot(from, to).await?;
        self.engine(&snapshot)
            .reservable_slots_range(from, to, granularity_minutes)
    }

    /// Open dates of `[from, to]` (closed days are suppressed from staff schedules)
    pub async fn open_days(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        range::check_range(from, to, self.limits.max_range_days)?;
        let snapshot = self.snapshot(from, to).await?;
        self.engine(&snapshot).open_days(from, to)
    }

    /// Whether a guest may book `time` on `date`
    pub async fn check_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        granularity_minutes: u32,
    ) -> AppResult<bool> {
        slots::validate_granularity(granularity_minutes)?;
        let snapshot = self.snapshot(date, date).await?;
        self.engine(&snapshot).is_reservable(date, time, granularity_minutes)
    }

    /// Calendar overview of an ISO week
    pub async fn week_overview(&self, iso_year: i32, week: u32) -> AppResult<WeekOverview> {
        let (monday, sunday) = iso_week_bounds(iso_year, week)?;
        let snapshot = self.snapshot(monday, sunday).await?;
        self.engine(&snapshot).week_overview(iso_year, week)
    }
}
