//! Closure models (holidays and ad-hoc calendar exceptions)

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    calendar::{end_minute_of_day, minute_of_day},
    error::{AppError, AppResult},
};

/// Which dates a closure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClosureKind {
    /// Same month and day every year (29 February only matches leap years)
    Recurring { month: u32, day: u32 },
    /// Explicit inclusive date range
    Dated {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

impl ClosureKind {
    pub fn covers(&self, date: NaiveDate) -> bool {
        match *self {
            ClosureKind::Recurring { month, day } => date.month() == month && date.day() == day,
            ClosureKind::Dated {
                start_date,
                end_date,
            } => start_date <= date && date <= end_date,
        }
    }

    pub fn is_dated(&self) -> bool {
        matches!(self, ClosureKind::Dated { .. })
    }
}

/// How much of the day a closure removes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ClosureScope {
    FullDay,
    TimeRange {
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

/// A calendar exception
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    pub id: i32,
    pub kind: ClosureKind,
    pub scope: ClosureScope,
    pub reason: String,
    /// Public holiday rather than an internal closure (inventory, private event...)
    pub is_holiday: bool,
    pub active: bool,
}

impl Closure {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.kind.covers(date)
    }

    pub fn validate(&self) -> AppResult<()> {
        if let ClosureScope::TimeRange {
            start_time,
            end_time,
        } = self.scope
        {
            if minute_of_day(start_time) >= end_minute_of_day(end_time) {
                return Err(AppError::ConfigInvalid(format!(
                    "closure {} time range {}-{} ends before it starts",
                    self.id, start_time, end_time
                )));
            }
        }
        Ok(())
    }
}

/// Whether `month`/`day` exists in some year (29 February does, in leap years)
pub fn is_calendar_day(month: u32, day: u32) -> bool {
    NaiveDate::from_ymd_opt(2000, month, day).is_some()
}

/// Row of the `schedule_closures` table
#[derive(Debug, Clone, FromRow)]
pub struct ClosureRow {
    pub id: i32,
    /// "recurring" or "one_off"
    pub closure_type: String,
    pub month: Option<i16>,
    pub day: Option<i16>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// "full_day" or "time_range"
    pub scope: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason: String,
    pub is_holiday: bool,
    pub active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

impl TryFrom<ClosureRow> for Closure {
    type Error = AppError;

    fn try_from(row: ClosureRow) -> AppResult<Self> {
        let invalid = |msg: &str| AppError::ConfigInvalid(format!("closure {}: {}", row.id, msg));

        let kind = match row.closure_type.as_str() {
            "recurring" => {
                let (month, day) = match (row.month, row.day) {
                    (Some(m @ 1..=12), Some(d @ 1..=31)) => (m as u32, d as u32),
                    _ => return Err(invalid("recurring closure needs month 1-12 and day 1-31")),
                };
                // Loaded for every query: a day no year has (31 April) only ever covers
                // nothing, so it must not fail unrelated dates.
                if !is_calendar_day(month, day) {
                    tracing::warn!(
                        "Closure {} recurs on {:02}-{:02}, which never occurs",
                        row.id,
                        month,
                        day
                    );
                }
                ClosureKind::Recurring { month, day }
            }
            "one_off" => match (row.start_date, row.end_date) {
                (Some(start_date), Some(end_date)) if start_date <= end_date => ClosureKind::Dated {
                    start_date,
                    end_date,
                },
                (Some(_), Some(_)) => return Err(invalid("end_date is before start_date")),
                _ => return Err(invalid("one-off closure needs start_date and end_date")),
            },
            other => return Err(invalid(&format!("unknown closure type '{}'", other))),
        };

        let scope = match row.scope.as_str() {
            "full_day" => ClosureScope::FullDay,
            "time_range" => match (row.start_time, row.end_time) {
                (Some(start_time), Some(end_time)) => ClosureScope::TimeRange {
                    start_time,
                    end_time,
                },
                _ => return Err(invalid("time range closure needs start_time and end_time")),
            },
            other => return Err(invalid(&format!("unknown closure scope '{}'", other))),
        };

        Ok(Self {
            id: row.id,
            kind,
            scope,
            reason: row.reason,
            is_holiday: row.is_holiday,
            active: row.active,
        })
    }
}
