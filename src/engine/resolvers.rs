//! Layer resolvers: what each configuration layer says about a single date

use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::{
    calendar::Weekday,
    error::{AppError, AppResult},
    models::{
        BlockedWindow, Closure, ClosureScope, DayOverride, OverrideStatus, Period, WeekdayRule,
    },
};

/// Pick the candidate with the highest priority. Equal priorities fall back to the
/// smallest id, and the tie is logged so the administrator can fix the overlap.
fn pick_highest<'a, T>(
    layer: &str,
    date: NaiveDate,
    candidates: &[&'a T],
    key: impl Fn(&T) -> (i32, i32),
) -> Option<&'a T> {
    let winner = *candidates.iter().max_by_key(|c| {
        let (priority, id) = key(**c);
        (priority, Reverse(id))
    })?;

    let (priority, winner_id) = key(winner);
    let tied: Vec<i32> = candidates
        .iter()
        .map(|c| key(*c))
        .filter(|(p, id)| *p == priority && *id != winner_id)
        .map(|(_, id)| id)
        .collect();
    if !tied.is_empty() {
        tracing::warn!(
            "{} {} wins priority tie ({}) on {} against {:?}",
            layer,
            winner_id,
            priority,
            date,
            tied
        );
    }

    Some(winner)
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Weekly rule selected for a date
#[derive(Debug, Clone, Copy)]
pub struct PeriodAnswer<'a> {
    pub period_id: i32,
    pub period_name: &'a str,
    pub weekday: Weekday,
    pub rule: &'a WeekdayRule,
}

pub struct PeriodResolver<'a> {
    periods: &'a [Period],
}

impl<'a> PeriodResolver<'a> {
    pub fn new(periods: &'a [Period]) -> Self {
        Self { periods }
    }

    /// `None` when no active period covers the date
    pub fn resolve(&self, date: NaiveDate) -> AppResult<Option<PeriodAnswer<'a>>> {
        let candidates: Vec<&Period> = self
            .periods
            .iter()
            .filter(|p| p.active && p.covers(date))
            .collect();

        let Some(period) = pick_highest("period", date, &candidates, |p| (p.priority, p.id)) else {
            return Ok(None);
        };

        let weekday = Weekday::of(date);
        let rule = period.rules.rule(weekday);
        rule.validate().map_err(|e| match e {
            AppError::ConfigInvalid(msg) => AppError::ConfigInvalid(format!(
                "period {} ({}) on {}: {}",
                period.id, period.name, weekday, msg
            )),
            other => other,
        })?;

        Ok(Some(PeriodAnswer {
            period_id: period.id,
            period_name: &period.name,
            weekday,
            rule,
        }))
    }
}

// ---------------------------------------------------------------------------
// Closures
// ---------------------------------------------------------------------------

/// Closure outcome for a date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureAnswer {
    FullDay {
        closure_id: i32,
        reason: String,
        is_holiday: bool,
    },
    /// One window per matching time-range closure, ordered by start time
    Partial {
        windows: Vec<BlockedWindow>,
        holiday_name: Option<String>,
    },
}

pub struct ClosureResolver<'a> {
    closures: &'a [Closure],
}

impl<'a> ClosureResolver<'a> {
    pub fn new(closures: &'a [Closure]) -> Self {
        Self { closures }
    }

    /// Dated closures shadow recurring ones; within the remaining set a full-day
    /// closure wins over time ranges, which otherwise all apply.
    pub fn resolve(&self, date: NaiveDate) -> AppResult<Option<ClosureAnswer>> {
        let matching: Vec<&Closure> = self
            .closures
            .iter()
            .filter(|c| c.active && c.covers(date))
            .collect();
        if matching.is_empty() {
            return Ok(None);
        }

        let has_dated = matching.iter().any(|c| c.kind.is_dated());
        let mut tier: Vec<&Closure> = matching
            .into_iter()
            .filter(|c| c.kind.is_dated() == has_dated)
            .collect();
        for closure in &tier {
            closure.validate()?;
        }
        tier.sort_by_key(|c| c.id);

        let full_day: Vec<&Closure> = tier
            .iter()
            .copied()
            .filter(|c| c.scope == ClosureScope::FullDay)
            .collect();
        if let Some(winner) = full_day.first() {
            if full_day.len() > 1 {
                tracing::warn!(
                    "{} full-day closures on {}, using closure {} ({})",
                    full_day.len(),
                    date,
                    winner.id,
                    winner.reason
                );
            }
            return Ok(Some(ClosureAnswer::FullDay {
                closure_id: winner.id,
                reason: winner.reason.clone(),
                is_holiday: winner.is_holiday,
            }));
        }

        let mut windows: Vec<BlockedWindow> = tier
            .iter()
            .filter_map(|c| match c.scope {
                ClosureScope::TimeRange {
                    start_time,
                    end_time,
                } => Some(BlockedWindow {
                    start_time,
                    end_time,
                    reason: c.reason.clone(),
                }),
                ClosureScope::FullDay => None,
            })
            .collect();
        windows.sort_by_key(|w| w.start_time);

        let holiday_name = tier.iter().find(|c| c.is_holiday).map(|c| c.reason.clone());

        Ok(Some(ClosureAnswer::Partial {
            windows,
            holiday_name,
        }))
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Winning override for a date
#[derive(Debug, Clone, Copy)]
pub struct OverrideAnswer<'a> {
    pub override_id: i32,
    pub note: &'a str,
    pub status: OverrideStatus,
}

pub struct OverrideResolver<'a> {
    overrides: &'a [DayOverride],
}

impl<'a> OverrideResolver<'a> {
    pub fn new(overrides: &'a [DayOverride]) -> Self {
        Self { overrides }
    }

    pub fn resolve(&self, date: NaiveDate) -> AppResult<Option<OverrideAnswer<'a>>> {
        let candidates: Vec<&DayOverride> =
            self.overrides.iter().filter(|o| o.covers(date)).collect();

        let Some(winner) = pick_highest("override", date, &candidates, |o| (o.priority, o.id)) else {
            return Ok(None);
        };
        winner.validate()?;

        Ok(Some(OverrideAnswer {
            override_id: winner.id,
            note: &winner.note,
            status: winner.status,
        }))
    }
}
