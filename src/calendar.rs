//! Calendar primitives (weekdays, ISO weeks, date ranges, minute-of-day arithmetic)
//!
//! Weekdays are mapped from chrono exactly once, here, so the rest of the crate never
//! deals with numeric weekday indexes.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

// ---------------------------------------------------------------------------
// Weekday
// ---------------------------------------------------------------------------

/// Day of the week, ISO order (Monday first)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Weekday of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(w: chrono::Weekday) -> Self {
        match w {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ISO weeks
// ---------------------------------------------------------------------------

/// First (Monday) and last (Sunday) date of an ISO week
pub fn iso_week_bounds(iso_year: i32, week: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let monday = NaiveDate::from_isoywd_opt(iso_year, week, chrono::Weekday::Mon);
    let sunday = NaiveDate::from_isoywd_opt(iso_year, week, chrono::Weekday::Sun);
    match (monday, sunday) {
        (Some(monday), Some(sunday)) => Ok((monday, sunday)),
        _ => Err(AppError::Validation(format!(
            "Week {} does not exist in ISO year {}",
            week, iso_year
        ))),
    }
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// Inclusive iterator over consecutive dates
#[derive(Debug, Clone)]
pub struct DateRange {
    next: Option<NaiveDate>,
    end: NaiveDate,
}

impl DateRange {
    /// Dates from `from` to `to`, both included. Empty when `to < from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            next: (from <= to).then_some(from),
            end: to,
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = current.succ_opt().filter(|d| *d <= self.end);
        Some(current)
    }
}

/// Number of days in `[from, to]`; zero or negative when the range is inverted
pub fn days_inclusive(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}

// ---------------------------------------------------------------------------
// Minute-of-day arithmetic
// ---------------------------------------------------------------------------

/// Minutes since midnight. Seconds are ignored: opening hours are kept to the minute.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Like [`minute_of_day`], but `00:00` used as the end of a window means midnight
/// at the end of the day.
pub fn end_minute_of_day(time: NaiveTime) -> u32 {
    match minute_of_day(time) {
        0 => MINUTES_PER_DAY,
        m => m,
    }
}

/// Inverse of [`minute_of_day`] for values below 24:00
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}
