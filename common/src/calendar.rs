//! Calendar range generation and month partitioning.
//!
//! Every function here takes "today" explicitly so results only depend on
//! their arguments.  Callers read the clock once and pass it down.

use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::selection::SelectionState;

/// One generated day of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Marks "today" as generated; views re-apply the live selection with
    /// [`CalendarDay::with_selection`].
    pub is_selected: bool,
    pub is_disabled: bool,
}

impl CalendarDay {
    /// Copy of this day with `is_selected` recomputed against `selection`.
    pub fn with_selection(self, selection: &SelectionState) -> Self {
        Self {
            is_selected: selection.is_selected(self.date),
            ..self
        }
    }
}

/// The days of a single calendar month, ascending and without gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
    days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number (1–12).
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// First day of the month.  Buckets always begin on the 1st.
    pub fn first_date(&self) -> NaiveDate {
        self.days
            .first()
            .map(|d| d.date)
            .or_else(|| NaiveDate::from_ymd_opt(self.year, self.month, 1))
            .unwrap_or_default()
    }

    /// Empty grid cells before the 1st in a Monday-start week (0 = Monday … 6 = Sunday).
    pub fn leading_blanks(&self) -> u32 {
        self.first_date().weekday().num_days_from_monday()
    }

    /// Copy of this month with `f` applied to every day.
    pub fn map_days(&self, f: impl FnMut(CalendarDay) -> CalendarDay) -> Self {
        Self {
            year: self.year,
            month: self.month,
            days: self.days.iter().copied().map(f).collect(),
        }
    }

    /// Copy of this month with every day's selection recomputed.
    pub fn with_selection(&self, selection: &SelectionState) -> Self {
        self.map_days(|day| day.with_selection(selection))
    }

    pub fn into_days(self) -> Vec<CalendarDay> {
        self.days
    }
}

/// Inputs of range generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub disabled_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub allows_past_dates: bool,
}

impl DateRangeConfig {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            disabled_dates: BTreeSet::new(),
            allows_past_dates: false,
        }
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.disabled_dates.extend(dates);
        self
    }

    pub fn allowing_past_dates(mut self, allows: bool) -> Self {
        self.allows_past_dates = allows;
        self
    }

    /// A reversed range generates nothing.
    pub fn is_empty(&self) -> bool {
        self.start_date > self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days in the range, inclusive.
    pub fn len_days(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.end_date - self.start_date).num_days() as usize + 1
    }

    /// Same range with the start moved back to the first of its month.
    pub fn month_aligned(&self) -> Self {
        Self {
            start_date: start_of_month(self.start_date),
            ..self.clone()
        }
    }

    /// Disabled-date policy.
    ///
    /// With past dates allowed only the explicit set applies.  Otherwise any
    /// day that ended before today is disabled and the explicit set is not
    /// consulted.
    pub fn is_disabled(&self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.allows_past_dates {
            self.disabled_dates.contains(&date)
        } else {
            date < today
        }
    }

    fn clipped(&self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            ..self.clone()
        }
    }
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Every day from `start_date` to `end_date` inclusive, ascending.
pub fn generate_date_range(config: &DateRangeConfig, today: NaiveDate) -> Vec<CalendarDay> {
    if config.is_empty() {
        return Vec::new();
    }

    let days: Vec<CalendarDay> = config
        .start_date
        .iter_days()
        .take_while(|date| *date <= config.end_date)
        .map(|date| CalendarDay {
            date,
            is_selected: date == today,
            is_disabled: config.is_disabled(date, today),
        })
        .collect();

    debug!(
        "Generated {} days ({} → {})",
        days.len(),
        config.start_date,
        config.end_date
    );
    days
}

/// Split the range into calendar months.
///
/// The first bucket starts on the 1st of the start month; the last bucket
/// stops at `end_date`.
pub fn partition_by_month(config: &DateRangeConfig, today: NaiveDate) -> Vec<CalendarMonth> {
    month_starts(config)
        .map(|first| month_bucket(config, first, today))
        .collect()
}

/// The first `count` buckets of [`partition_by_month`].
pub fn partition_by_month_prefix(
    config: &DateRangeConfig,
    today: NaiveDate,
    count: usize,
) -> Vec<CalendarMonth> {
    month_starts(config)
        .take(count)
        .map(|first| month_bucket(config, first, today))
        .collect()
}

/// Number of buckets [`partition_by_month`] would produce.
pub fn month_count(config: &DateRangeConfig) -> usize {
    month_starts(config).count()
}

fn month_starts(config: &DateRangeConfig) -> impl Iterator<Item = NaiveDate> {
    let first = (!config.is_empty()).then(|| start_of_month(config.start_date));
    let last = start_of_month(config.end_date);
    std::iter::successors(first, |month| month.checked_add_months(Months::new(1)))
        .take_while(move |month| *month <= last)
}

fn month_bucket(config: &DateRangeConfig, first: NaiveDate, today: NaiveDate) -> CalendarMonth {
    let last = end_of_month(first).min(config.end_date);
    CalendarMonth {
        year: first.year(),
        month: first.month(),
        days: generate_date_range(&config.clipped(first, last), today),
    }
}

// ─── tests ───────────────────────────────────────────────────────────────
