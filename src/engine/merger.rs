//! Precedence merger: Override → Closure → Period → closed by default

use chrono::NaiveDate;

use crate::models::{Block, DaySource, EffectiveDay, OverrideStatus};

use super::resolvers::{ClosureAnswer, OverrideAnswer, PeriodAnswer};

pub const NO_CONFIGURATION: &str = "no configuration for this date";
pub const WEEKLY_CLOSING_DAY: &str = "weekly closing day";

/// Combine the three layer answers for `date` into exactly one effective day.
///
/// An override decides the day on its own. A full-day closure closes the day; a
/// partial closure only adds blocked windows to whatever the period decided. With no
/// period the day is closed: availability is never assumed.
pub fn merge(
    date: NaiveDate,
    period: Option<PeriodAnswer<'_>>,
    closure: Option<ClosureAnswer>,
    day_override: Option<OverrideAnswer<'_>>,
) -> EffectiveDay {
    if let Some(answer) = day_override {
        return from_override(date, answer);
    }

    let day = match period {
        Some(answer) => from_period(date, answer),
        None => EffectiveDay::closed(date, DaySource::Default, NO_CONFIGURATION),
    };

    match closure {
        None => day,
        Some(ClosureAnswer::FullDay {
            reason, is_holiday, ..
        }) => {
            let mut closed = EffectiveDay::closed(date, DaySource::Closure, reason.clone());
            if is_holiday {
                closed.is_holiday = true;
                closed.holiday_name = Some(reason);
            }
            closed
        }
        Some(ClosureAnswer::Partial {
            windows,
            holiday_name,
        }) => {
            let mut day = day;
            if let Some(name) = holiday_name {
                day.is_holiday = true;
                day.holiday_name = Some(name);
            }
            // Windows only make sense against blocks that survived
            if day.is_open && !windows.is_empty() {
                day.source = DaySource::Closure;
                for window in &windows {
                    if !day.notes.contains(&window.reason) {
                        day.notes.push(window.reason.clone());
                    }
                }
                day.blocked_windows = windows;
            }
            day
        }
    }
}

fn from_override(date: NaiveDate, answer: OverrideAnswer<'_>) -> EffectiveDay {
    match answer.status {
        OverrideStatus::Closed => EffectiveDay::closed(date, DaySource::Override, answer.note),
        OverrideStatus::Open {
            open_from,
            open_to,
            last_reservation_time,
        } => {
            let mut day = EffectiveDay::open(
                date,
                DaySource::Override,
                vec![Block::new(open_from, open_to, true)],
            );
            day.last_reservation_time = last_reservation_time;
            day.notes.push(answer.note.to_string());
            day
        }
    }
}

fn from_period(date: NaiveDate, answer: PeriodAnswer<'_>) -> EffectiveDay {
    if answer.rule.is_closed {
        EffectiveDay::closed(date, DaySource::Period, WEEKLY_CLOSING_DAY)
    } else {
        EffectiveDay::open(date, DaySource::Period, answer.rule.blocks.clone())
    }
}
