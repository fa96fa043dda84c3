//! Range computer: per-date resolution over an inclusive date range

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    calendar::{days_inclusive, DateRange},
    error::{AppError, AppResult},
};

/// Reject inverted or oversized ranges. Returns the number of days covered.
pub fn check_range(from: NaiveDate, to: NaiveDate, max_days: u32) -> AppResult<i64> {
    if to < from {
        return Err(AppError::InvalidRange { from, to });
    }
    let requested = days_inclusive(from, to);
    if requested > i64::from(max_days) {
        return Err(AppError::RangeTooLarge {
            requested,
            max_days,
        });
    }
    Ok(requested)
}

/// Apply `resolve` to every date of `[from, to]`, keyed by date in ascending order.
/// The first failing date fails the whole range.
pub fn resolve_range<T, F>(
    from: NaiveDate,
    to: NaiveDate,
    max_days: u32,
    mut resolve: F,
) -> AppResult<IndexMap<NaiveDate, T>>
where
    F: FnMut(NaiveDate) -> AppResult<T>,
{
    let days = check_range(from, to, max_days)?;
    let mut result = IndexMap::with_capacity(days as usize);
    for date in DateRange::new(from, to) {
        result.insert(date, resolve(date)?);
    }
    Ok(result)
}
