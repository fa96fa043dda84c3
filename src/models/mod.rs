//! Data models for availability resolution

pub mod closure;
pub mod day_override;
pub mod effective_day;
pub mod period;

// Re-export commonly used types
pub use closure::{Closure, ClosureKind, ClosureScope};
pub use day_override::{DayOverride, OverrideStatus};
pub use effective_day::{BlockedWindow, DaySource, EffectiveDay, WeekOverview};
pub use period::{Block, Period, WeekdayRule, WeeklyRules};
