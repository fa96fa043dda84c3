//! Period models (dated, prioritized weekly opening rules)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;

use crate::{
    calendar::{end_minute_of_day, minute_of_day, Weekday},
    error::{AppError, AppResult},
};

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A contiguous opening window within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Block {
    /// Window start (HH:MM:SS)
    #[schema(value_type = String, example = "11:30:00")]
    pub start_time: NaiveTime,
    /// Window end (HH:MM:SS); 00:00:00 means midnight at the end of the day
    #[schema(value_type = String, example = "22:00:00")]
    pub end_time: NaiveTime,
    /// Whether guests may book slots in this window
    pub reservable: bool,
    pub label: Option<String>,
}

impl Block {
    pub fn new(start_time: NaiveTime, end_time: NaiveTime, reservable: bool) -> Self {
        Self {
            start_time,
            end_time,
            reservable,
            label: None,
        }
    }

    /// Start and end as minutes since midnight
    pub fn minutes(&self) -> (u32, u32) {
        (minute_of_day(self.start_time), end_minute_of_day(self.end_time))
    }

    pub fn validate(&self) -> AppResult<()> {
        let (start, end) = self.minutes();
        if start >= end {
            return Err(AppError::ConfigInvalid(format!(
                "block {}-{} ends before it starts",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WeekdayRule
// ---------------------------------------------------------------------------

/// Opening rule for one weekday of a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayRule {
    pub is_closed: bool,
    /// Opening windows; order and overlap are not significant
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl WeekdayRule {
    pub fn closed() -> Self {
        Self {
            is_closed: true,
            blocks: Vec::new(),
        }
    }

    pub fn open(blocks: Vec<Block>) -> Self {
        Self {
            is_closed: false,
            blocks,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.is_closed {
            return Ok(());
        }
        if self.blocks.is_empty() {
            return Err(AppError::ConfigInvalid(
                "open weekday rule has no opening block".to_string(),
            ));
        }
        self.blocks.iter().try_for_each(Block::validate)
    }
}

/// One rule per weekday, keyed by name rather than by index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRules {
    pub monday: WeekdayRule,
    pub tuesday: WeekdayRule,
    pub wednesday: WeekdayRule,
    pub thursday: WeekdayRule,
    pub friday: WeekdayRule,
    pub saturday: WeekdayRule,
    pub sunday: WeekdayRule,
}

impl WeeklyRules {
    /// Same rule on every day of the week
    pub fn every_day(rule: WeekdayRule) -> Self {
        Self {
            monday: rule.clone(),
            tuesday: rule.clone(),
            wednesday: rule.clone(),
            thursday: rule.clone(),
            friday: rule.clone(),
            saturday: rule.clone(),
            sunday: rule,
        }
    }

    pub fn rule(&self, weekday: Weekday) -> &WeekdayRule {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn rule_mut(&mut self, weekday: Weekday) -> &mut WeekdayRule {
        match weekday {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// A named schedule period (e.g. "Summer 2025")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: i32,
    pub name: String,
    /// First day covered
    pub start_date: NaiveDate,
    /// Last day covered (inclusive)
    pub end_date: NaiveDate,
    /// Higher wins when periods overlap
    pub priority: i32,
    pub active: bool,
    pub rules: WeeklyRules,
}

impl Period {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Row of the `schedule_periods` table
#[derive(Debug, Clone, FromRow)]
pub struct PeriodRow {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: i32,
    pub active: bool,
    pub rules: Json<WeeklyRules>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl TryFrom<PeriodRow> for Period {
    type Error = AppError;

    fn try_from(row: PeriodRow) -> AppResult<Self> {
        if row.end_date < row.start_date {
            return Err(AppError::ConfigInvalid(format!(
                "period {} ends ({}) before it starts ({})",
                row.id, row.end_date, row.start_date
            )));
        }
        Ok(Self {
            id: row.id,
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
            priority: row.priority,
            active: row.active,
            rules: row.rules.0,
        })
    }
}
