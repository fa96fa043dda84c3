//! Override models (highest-precedence dated exceptions)

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    calendar::{end_minute_of_day, minute_of_day},
    error::{AppError, AppResult},
};

/// What an override forces the day to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverrideStatus {
    Closed,
    Open {
        open_from: NaiveTime,
        open_to: NaiveTime,
        /// Latest booking start, exclusive
        last_reservation_time: Option<NaiveTime>,
    },
}

/// An explicitly dated exception superseding periods and closures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverride {
    pub id: i32,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub priority: i32,
    pub note: String,
    pub status: OverrideStatus,
}

impl DayOverride {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.date_from <= date && date <= self.date_to
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.note.trim().is_empty() {
            return Err(AppError::ConfigInvalid(format!(
                "override {} has no note",
                self.id
            )));
        }
        if let OverrideStatus::Open {
            open_from,
            open_to,
            last_reservation_time,
        } = self.status
        {
            let close = end_minute_of_day(open_to);
            if minute_of_day(open_from) >= close {
                return Err(AppError::ConfigInvalid(format!(
                    "override {} closes ({}) before it opens ({})",
                    self.id, open_to, open_from
                )));
            }
            if let Some(cutoff) = last_reservation_time {
                if end_minute_of_day(cutoff) > close {
                    return Err(AppError::ConfigInvalid(format!(
                        "override {} last reservation time {} is after closing time {}",
                        self.id, cutoff, open_to
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Row of the `schedule_overrides` table
#[derive(Debug, Clone, FromRow)]
pub struct OverrideRow {
    pub id: i32,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// "open" or "closed"
    pub status: String,
    pub priority: i32,
    pub note: String,
    pub open_from: Option<NaiveTime>,
    pub open_to: Option<NaiveTime>,
    pub last_reservation_time: Option<NaiveTime>,
    pub crea_date: Option<DateTime<Utc>>,
}

impl TryFrom<OverrideRow> for DayOverride {
    type Error = AppError;

    fn try_from(row: OverrideRow) -> AppResult<Self> {
        if row.date_to < row.date_from {
            return Err(AppError::ConfigInvalid(format!(
                "override {} ends ({}) before it starts ({})",
                row.id, row.date_to, row.date_from
            )));
        }

        let status = match (row.status.as_str(), row.open_from, row.open_to) {
            ("closed", _, _) => OverrideStatus::Closed,
            ("open", Some(open_from), Some(open_to)) => OverrideStatus::Open {
                open_from,
                open_to,
                last_reservation_time: row.last_reservation_time,
            },
            ("open", _, _) => {
                return Err(AppError::ConfigInvalid(format!(
                    "override {} is open but has no open_from/open_to",
                    row.id
                )))
            }
            (other, _, _) => {
                return Err(AppError::ConfigInvalid(format!(
                    "override {} has unknown status '{}'",
                    row.id, other
                )))
            }
        };

        Ok(Self {
            id: row.id,
            date_from: row.date_from,
            date_to: row.date_to,
            priority: row.priority,
            note: row.note,
            status,
        })
    }
}
