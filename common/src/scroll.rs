//! Week-strip scroll target resolution.

use chrono::{Datelike, NaiveDate};

use crate::calendar::CalendarDay;

/// Week starts at or below this index are already on screen when the strip
/// is at its first page.
pub const LEADING_WINDOW_LAST_INDEX: i64 = 6;

/// Monday = 1 … Sunday = 7.
pub fn weekday_ordinal(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Index of the Monday of `date`'s week, given `date` sits at `index`.
/// Negative when that Monday is before the start of the strip.
pub fn first_index_of_week(index: usize, date: NaiveDate) -> i64 {
    index as i64 - i64::from(weekday_ordinal(date)) + 1
}

/// Index the week strip should scroll to so that `target` is visible.
///
/// Returns `None` when `target` is not in `days`, which means "don't scroll".
/// Today and any date inside the leading week snap back to the start.
pub fn resolve_scroll_index(
    target: NaiveDate,
    days: &[CalendarDay],
    today: NaiveDate,
) -> Option<usize> {
    let index = days.iter().position(|day| day.date == target)?;
    let week_start = first_index_of_week(index, target);

    let resolved = if target == today || week_start <= LEADING_WINDOW_LAST_INDEX {
        0
    } else {
        week_start
    };
    usize::try_from(resolved).ok()
}
