//! Bounded-eager materialisation of the month grid.
//!
//! The grid starts with a handful of months and widens to the whole range
//! the first time the user scrolls near the bottom.  The window only ever
//! grows.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::{
    month_count, partition_by_month, partition_by_month_prefix, CalendarMonth, DateRangeConfig,
};

/// Months shown after the start month before "load more" is needed.
pub const MAX_MONTHS_AHEAD: usize = 4;

/// Initial number of month buckets: the start month plus [`MAX_MONTHS_AHEAD`].
pub const DEFAULT_INITIAL_MONTHS: usize = MAX_MONTHS_AHEAD + 1;

#[derive(Debug, Clone)]
pub struct MonthWindow {
    config: DateRangeConfig,
    today: NaiveDate,
    months: Vec<CalendarMonth>,
    total: usize,
}

impl MonthWindow {
    pub fn new(config: DateRangeConfig, today: NaiveDate, initial_months: usize) -> Self {
        let total = month_count(&config);
        let months = partition_by_month_prefix(&config, today, initial_months);
        debug!("Month window: {} of {} months loaded", months.len(), total);
        Self {
            config,
            today,
            months,
            total,
        }
    }

    pub fn months(&self) -> &[CalendarMonth] {
        &self.months
    }

    pub fn total_months(&self) -> usize {
        self.total
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.months.len() >= self.total
    }

    /// Materialise every month.  Returns `true` if the window grew.
    pub fn load_all(&mut self) -> bool {
        if self.is_fully_loaded() {
            return false;
        }
        self.months = partition_by_month(&self.config, self.today);
        debug!("Month window widened to {} months", self.months.len());
        true
    }
}

/// Load-more trigger: the viewport is within a third of its height from the
/// end of the content.
pub fn is_close_to_bottom(viewport_height: f64, scroll_offset: f64, content_height: f64) -> bool {
    let padding_to_bottom = viewport_height / 3.0;
    viewport_height + scroll_offset >= content_height - padding_to_bottom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_window_widens_once() {
        let config = DateRangeConfig::new(d(2024, 1, 10), d(2024, 12, 31));
        let today = d(2024, 1, 10);
        let mut window = MonthWindow::new(config.clone(), today, DEFAULT_INITIAL_MONTHS);

        assert_eq!(window.months().len(), 5);
        assert_eq!(window.total_months(), 12);
        assert!(!window.is_fully_loaded());

        let prefix = window.months().to_vec();
        assert!(window.load_all());
        assert!(window.is_fully_loaded());
        assert_eq!(&window.months()[..5], prefix.as_slice());
        assert_eq!(window.months(), partition_by_month(&config, today).as_slice());

        assert!(!window.load_all());
        assert_eq!(window.months().len(), 12);
    }

    #[test]
    fn test_short_range_starts_fully_loaded() {
        let config = DateRangeConfig::new(d(2024, 1, 10), d(2024, 2, 9));
        let mut window = MonthWindow::new(config, d(2024, 1, 10), DEFAULT_INITIAL_MONTHS);
        assert!(window.is_fully_loaded());
        assert!(!window.load_all());
    }

    #[test]
    fn test_close_to_bottom() {
        assert!(!is_close_to_bottom(900.0, 0.0, 3000.0));
        assert!(is_close_to_bottom(900.0, 1800.0, 3000.0));
        assert!(is_close_to_bottom(900.0, 0.0, 900.0));
    }
}
