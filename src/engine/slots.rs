//! Slot generator: discrete bookable start times for an effective day

use std::collections::BTreeSet;

use chrono::NaiveTime;

use crate::{
    calendar::{end_minute_of_day, time_from_minutes},
    error::{AppError, AppResult},
    models::EffectiveDay,
};

/// Coarsest slot step accepted (half a day)
pub const MAX_GRANULARITY_MINUTES: u32 = 12 * 60;

pub fn validate_granularity(granularity_minutes: u32) -> AppResult<()> {
    if granularity_minutes == 0 || granularity_minutes > MAX_GRANULARITY_MINUTES {
        return Err(AppError::Validation(format!(
            "granularity must be between 1 and {} minutes, got {}",
            MAX_GRANULARITY_MINUTES, granularity_minutes
        )));
    }
    Ok(())
}

/// Bookable start times of `day`, ascending and without duplicates.
///
/// Each reservable block yields `start, start + step, ...` strictly before its end.
/// Times inside a blocked window, or at/after the last reservation time, are skipped.
/// A closed day has no slots.
pub fn generate_slots(day: &EffectiveDay, granularity_minutes: u32) -> AppResult<Vec<NaiveTime>> {
    validate_granularity(granularity_minutes)?;
    if !day.is_open {
        return Ok(Vec::new());
    }

    let cutoff = day.last_reservation_time.map(end_minute_of_day);
    let mut minutes = BTreeSet::new();

    for block in day.blocks.iter().filter(|b| b.reservable) {
        let (start, end) = block.minutes();
        let mut minute = start;
        while minute < end {
            if cutoff.map_or(false, |c| minute >= c) {
                break;
            }
            if !day.blocked_windows.iter().any(|w| w.contains_minute(minute)) {
                minutes.insert(minute);
            }
            minute += granularity_minutes;
        }
    }

    Ok(minutes.into_iter().filter_map(time_from_minutes).collect())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{Block, BlockedWindow, DaySource};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn open_day(blocks: Vec<Block>) -> EffectiveDay {
        EffectiveDay::open(
            NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            DaySource::Period,
            blocks,
        )
    }

    #[test]
    fn test_block_end_is_exclusive() {
        let day = open_day(vec![Block::new(t(12, 0), t(13, 0), true)]);
        let slots = generate_slots(&day, 15).unwrap();
        assert_eq!(slots, vec![t(12, 0), t(12, 15), t(12, 30), t(12, 45)]);
    }

    #[test]
    fn test_steps_from_block_start() {
        let day = open_day(vec![Block::new(t(11, 50), t(12, 30), true)]);
        let slots = generate_slots(&day, 20).unwrap();
        assert_eq!(slots, vec![t(11, 50), t(12, 10)]);
    }

    #[test]
    fn test_overlapping_blocks_deduplicated_and_sorted() {
        let day = open_day(vec![
            Block::new(t(19, 0), t(20, 0), true),
            Block::new(t(18, 30), t(19, 30), true),
        ]);
        let slots = generate_slots(&day, 30).unwrap();
        assert_eq!(slots, vec![t(18, 30), t(19, 0), t(19, 30)]);
    }

    #[test]
    fn test_non_reservable_block_skipped() {
        let day = open_day(vec![
            Block::new(t(15, 0), t(16, 0), false),
            Block::new(t(19, 0), t(19, 30), true),
        ]);
        assert_eq!(generate_slots(&day, 15).unwrap(), vec![t(19, 0), t(19, 15)]);
    }

    #[test]
    fn test_blocked_window_excluded() {
        let mut day = open_day(vec![Block::new(t(12, 0), t(14, 0), true)]);
        day.blocked_windows.push(BlockedWindow {
            start_time: t(12, 30),
            end_time: t(13, 30),
            reason: "Private event".to_string(),
        });
        let slots = generate_slots(&day, 30).unwrap();
        assert_eq!(slots, vec![t(12, 0), t(13, 30)]);
    }

    #[test]
    fn test_cutoff_is_exclusive() {
        let mut day = open_day(vec![Block::new(t(12, 0), t(16, 0), true)]);
        day.last_reservation_time = Some(t(13, 0));
        let slots = generate_slots(&day, 30).unwrap();
        assert_eq!(slots, vec![t(12, 0), t(12, 30)]);
    }

    #[test]
    fn test_block_until_midnight() {
        let day = open_day(vec![Block::new(t(23, 0), NaiveTime::MIN, true)]);
        let slots = generate_slots(&day, 30).unwrap();
        assert_eq!(slots, vec![t(23, 0), t(23, 30)]);
    }

    #[test]
    fn test_midnight_cutoff_keeps_evening_slots() {
        let mut day = open_day(vec![Block::new(t(19, 0), NaiveTime::MIN, true)]);
        day.last_reservation_time = Some(NaiveTime::MIN);
        let slots = generate_slots(&day, 60).unwrap();
        assert_eq!(slots, vec![t(19, 0), t(20, 0), t(21, 0), t(22, 0), t(23, 0)]);
    }

    #[test]
    fn test_closed_day_has_no_slots() {
        let day = EffectiveDay::closed(
            NaiveDate::from_ymd_opt(2025, 7, 15).unwrap(),
            DaySource::Default,
            "closed",
        );
        assert!(generate_slots(&day, 15).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_granularity() {
        let day = open_day(vec![Block::new(t(12, 0), t(13, 0), true)]);
        assert!(matches!(generate_slots(&day, 0), Err(AppError::Validation(_))));
        assert!(generate_slots(&day, MAX_GRANULARITY_MINUTES + 1).is_err());
        assert!(generate_slots(&day, MAX_GRANULARITY_MINUTES).is_ok());
    }
}
