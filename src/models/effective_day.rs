//! Resolved availability of one calendar date (computed, never stored)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::{end_minute_of_day, minute_of_day, Weekday};

use super::period::Block;

/// Configuration layer that decided a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
    Override,
    Closure,
    Period,
    /// No layer covers the date
    Default,
}

/// A sub-range of an open day excluded from booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlockedWindow {
    #[schema(value_type = String, example = "18:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "20:00:00")]
    pub end_time: NaiveTime,
    pub reason: String,
}

impl BlockedWindow {
    /// Whether a slot starting at `minute` falls in `[start, end)`
    pub fn contains_minute(&self, minute: u32) -> bool {
        minute_of_day(self.start_time) <= minute && minute < end_minute_of_day(self.end_time)
    }
}

/// Merged availability answer for one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EffectiveDay {
    #[schema(value_type = String, format = Date, example = "2025-07-15")]
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_open: bool,
    pub source: DaySource,
    /// Opening windows of the winning layer (empty when closed)
    pub blocks: Vec<Block>,
    pub blocked_windows: Vec<BlockedWindow>,
    pub notes: Vec<String>,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub closure_reason: Option<String>,
    /// Latest booking start, exclusive
    #[schema(value_type = Option<String>, example = "14:30:00")]
    pub last_reservation_time: Option<NaiveTime>,
}

impl EffectiveDay {
    /// A closed day with the given reason
    pub fn closed(date: NaiveDate, source: DaySource, reason: impl Into<String>) -> Self {
        Self {
            date,
            weekday: Weekday::of(date),
            is_open: false,
            source,
            blocks: Vec::new(),
            blocked_windows: Vec::new(),
            notes: Vec::new(),
            is_holiday: false,
            holiday_name: None,
            closure_reason: Some(reason.into()),
            last_reservation_time: None,
        }
    }

    /// An open day with the given blocks
    pub fn open(date: NaiveDate, source: DaySource, blocks: Vec<Block>) -> Self {
        Self {
            date,
            weekday: Weekday::of(date),
            is_open: true,
            source,
            blocks,
            blocked_windows: Vec::new(),
            notes: Vec::new(),
            is_holiday: false,
            holiday_name: None,
            closure_reason: None,
            last_reservation_time: None,
        }
    }
}

/// Seven effective days of one ISO week, Monday first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WeekOverview {
    pub iso_year: i32,
    pub week: u32,
    pub days: Vec<EffectiveDay>,
    /// Number of open days in the week
    pub open_days: u32,
}
