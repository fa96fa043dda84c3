//! Availability resolution engine
//!
//! Pure computation over a [`ConfigSnapshot`]: the layer resolvers answer what
//! periods, closures and overrides say about a date, the merger combines them into
//! one [`EffectiveDay`], and the range computer and slot generator build on that.
//! Nothing here performs I/O or keeps state between calls.

pub mod merger;
pub mod range;
pub mod resolvers;
pub mod slots;

use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{iso_week_bounds, DateRange},
    config::AvailabilityConfig,
    error::AppResult,
    models::{Closure, DayOverride, EffectiveDay, Period, WeekOverview},
};

use resolvers::{ClosureAnswer, ClosureResolver, OverrideResolver, PeriodResolver};

/// Configuration records read for one query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub periods: Vec<Period>,
    pub closures: Vec<Closure>,
    pub overrides: Vec<DayOverride>,
}

/// Query surface over a single configuration snapshot
pub struct AvailabilityEngine<'a> {
    snapshot: &'a ConfigSnapshot,
    max_range_days: u32,
}

impl<'a> AvailabilityEngine<'a> {
    pub fn new(snapshot: &'a ConfigSnapshot, limits: &AvailabilityConfig) -> Self {
        Self {
            snapshot,
            max_range_days: limits.max_range_days,
        }
    }

    /// Merged answer for one date
    pub fn effective_day(&self, date: NaiveDate) -> AppResult<EffectiveDay> {
        let period = PeriodResolver::new(&self.snapshot.periods).resolve(date)?;
        let closure = ClosureResolver::new(&self.snapshot.closures).resolve(date)?;
        let day_override = OverrideResolver::new(&self.snapshot.overrides).resolve(date)?;

        if let Some(answer) = &period {
            tracing::debug!(
                "{}: period {} ({}) supplies the {} rule",
                date,
                answer.period_id,
                answer.period_name,
                answer.weekday
            );
        }
        if let Some(ClosureAnswer::FullDay { closure_id, .. }) = &closure {
            tracing::debug!("{}: closed all day by closure {}", date, closure_id);
        }
        if let Some(answer) = &day_override {
            tracing::debug!("{}: override {} decides the day", date, answer.override_id);
        }

        let day = merger::merge(date, period, closure, day_override);
        tracing::debug!(
            "Resolved {}: open={} source={:?} blocks={}",
            date,
            day.is_open,
            day.source,
            day.blocks.len()
        );
        Ok(day)
    }

    /// Merged answers for every date of `[from, to]`, ascending
    pub fn effective_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<IndexMap<NaiveDate, EffectiveDay>> {
        range::resolve_range(from, to, self.max_range_days, |date| self.effective_day(date))
    }

    /// Bookable start times for one date
    pub fn reservable_slots(
        &self,
        date: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<Vec<NaiveTime>> {
        slots::validate_granularity(granularity_minutes)?;
        let day = self.effective_day(date)?;
        slots::generate_slots(&day, granularity_minutes)
    }

    /// Bookable start times for every date of `[from, to]`
    pub fn reservable_slots_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        granularity_minutes: u32,
    ) -> AppResult<IndexMap<NaiveDate, Vec<NaiveTime>>> {
        slots::validate_granularity(granularity_minutes)?;
        range::resolve_range(from, to, self.max_range_days, |date| {
            self.reservable_slots(date, granularity_minutes)
        })
    }

    /// Dates of `[from, to]` on which the restaurant is open
    pub fn open_days(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        let days = self.effective_range(from, to)?;
        Ok(days
            .into_values()
            .filter(|day| day.is_open)
            .map(|day| day.date)
            .collect())
    }

    /// Whether `time` is one of the slots offered on `date`
    pub fn is_reservable(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        granularity_minutes: u32,
    ) -> AppResult<bool> {
        let slots = self.reservable_slots(date, granularity_minutes)?;
        Ok(slots.binary_search(&time).is_ok())
    }

    /// The seven days of an ISO week
    pub fn week_overview(&self, iso_year: i32, week: u32) -> AppResult<WeekOverview> {
        let (monday, sunday) = iso_week_bounds(iso_year, week)?;
        let days = DateRange::new(monday, sunday)
            .map(|date| self.effective_day(date))
            .collect::<AppResult<Vec<_>>>()?;
        let open_days = days.iter().filter(|d| d.is_open).count() as u32;

        Ok(WeekOverview {
            iso_year,
            week,
            days,
            open_days,
        })
    }
}
