//! Picker controller: the state behind a week strip and a month grid.
//!
//! Hosts feed user input in as [`Command`]s and get back [`Event`]s to
//! dispatch (notify the app, scroll a view, show a spinner).  The selected
//! date stays host-owned: a tap yields [`Event::DateChanged`], and the host
//! confirms it with [`Command::SetSelectedDate`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{generate_date_range, CalendarDay, CalendarMonth, DateRangeConfig};
use crate::config::PickerConfig;
use crate::scroll::resolve_scroll_index;
use crate::selection::SelectionState;
use crate::window::MonthWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Week,
    Month,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month => ViewMode::Week,
        }
    }
}

/// User or host input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A day cell was tapped.
    PressDate(NaiveDate),
    /// Bring a date's week into view without selecting it.
    ScrollTo(NaiveDate),
    GoToToday,
    ToggleView,
    /// The month grid scrolled close to its end.
    ReachedBottom,
    /// The host changed the selection.
    SetSelectedDate(NaiveDate),
}

/// Output for the host to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Event {
    /// Selection change request for the host.
    DateChanged(NaiveDate),
    ScrollWeekStrip { index: usize },
    ScrollMonthGridToTop,
    ViewChanged(ViewMode),
    MonthsLoaded { total: usize },
}

#[derive(Debug, Clone)]
pub struct DatePicker {
    range: DateRangeConfig,
    today: NaiveDate,
    marked_dates: BTreeSet<NaiveDate>,
    days: Vec<CalendarDay>,
    window: MonthWindow,
    selection: SelectionState,
    view_mode: ViewMode,
}

impl DatePicker {
    pub fn new(config: &PickerConfig, today: NaiveDate) -> Self {
        let range = config.range(today);
        let days = generate_date_range(&range, today);
        let window = MonthWindow::new(range.clone(), today, config.initial_months);
        Self {
            range,
            today,
            marked_dates: config.marked_dates.clone(),
            days,
            window,
            selection: SelectionState::new(config.selected(today)),
            view_mode: ViewMode::default(),
        }
    }

    pub fn handle(&mut self, command: Command) -> Vec<Event> {
        debug!("Picker command: {command:?}");
        match command {
            Command::PressDate(date) => self.press(date),
            Command::ScrollTo(date) => self.scroll_to(date).into_iter().collect(),
            Command::GoToToday => self.press(self.today),
            Command::ToggleView => {
                self.view_mode = self.view_mode.toggled();
                let mut events = vec![Event::ViewChanged(self.view_mode)];
                if self.view_mode == ViewMode::Month {
                    events.push(Event::ScrollMonthGridToTop);
                }
                events
            }
            Command::ReachedBottom => {
                if self.window.load_all() {
                    vec![Event::MonthsLoaded {
                        total: self.window.months().len(),
                    }]
                } else {
                    Vec::new()
                }
            }
            Command::SetSelectedDate(date) => {
                self.selection = self.selection.select(date);
                Vec::new()
            }
        }
    }

    fn press(&self, date: NaiveDate) -> Vec<Event> {
        if !self.is_selectable(date) {
            debug!("Ignoring press on unselectable {date}");
            return Vec::new();
        }
        let mut events = vec![Event::DateChanged(date)];
        events.extend(self.scroll_to(date));
        events
    }

    fn scroll_to(&self, date: NaiveDate) -> Option<Event> {
        resolve_scroll_index(date, &self.days, self.today).map(|index| Event::ScrollWeekStrip { index })
    }

    fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days
            .binary_search_by_key(&date, |day| day.date)
            .ok()
            .map(|index| &self.days[index])
    }

    /// In range and not disabled.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.day(date).is_some_and(|day| !day.is_disabled)
    }

    /// Scroll target for the initially selected date, applied once on mount.
    pub fn initial_scroll(&self) -> Option<usize> {
        resolve_scroll_index(self.selection.selected(), &self.days, self.today)
    }

    /// Week strip days with the live selection applied.
    pub fn week_strip(&self) -> Vec<CalendarDay> {
        self.days
            .iter()
            .map(|day| day.with_selection(&self.selection))
            .collect()
    }

    /// Loaded months with the live selection applied.  Leading days before
    /// the range start are shown but disabled.
    pub fn months(&self) -> Vec<CalendarMonth> {
        self.window
            .months()
            .iter()
            .map(|month| {
                month.with_selection(&self.selection).map_days(|day| CalendarDay {
                    is_disabled: day.is_disabled || !self.range.contains(day.date),
                    ..day
                })
            })
            .collect()
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.window.is_fully_loaded()
    }

    pub fn total_months(&self) -> usize {
        self.window.total_months()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_marked(&self, date: NaiveDate) -> bool {
        self.marked_dates.contains(&date)
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn range(&self) -> &DateRangeConfig {
        &self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // Today is Monday 2024-01-15; range runs to the end of 2024.
    fn picker() -> DatePicker {
        let config = PickerConfig {
            start_date: Some(d(2024, 1, 15)),
            max_date: Some(d(2024, 12, 31)),
            disabled_dates: [d(2024, 1, 20)].into_iter().collect(),
            marked_dates: [d(2024, 2, 1)].into_iter().collect(),
            ..PickerConfig::default()
        };
        DatePicker::new(&config, d(2024, 1, 15))
    }

    #[test]
    fn test_press_requests_change_without_selecting() {
        let mut picker = picker();
        let events = picker.handle(Command::PressDate(d(2024, 2, 1)));
        // 2024-02-01 is a Thursday at index 17; its Monday sits at 14.
        assert_eq!(
            events,
            vec![Event::DateChanged(d(2024, 2, 1)), Event::ScrollWeekStrip { index: 14 }]
        );
        assert_eq!(picker.selection().selected(), d(2024, 1, 15));

        picker.handle(Command::SetSelectedDate(d(2024, 2, 1)));
        assert_eq!(picker.selection().selected(), d(2024, 2, 1));
        let selected: Vec<_> = picker.week_strip().into_iter().filter(|day| day.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, d(2024, 2, 1));
    }

    #[test]
    fn test_press_outside_range_is_ignored() {
        let mut picker = picker();
        assert!(picker.handle(Command::PressDate(d(2024, 1, 14))).is_empty());
        assert!(picker.handle(Command::PressDate(d(2025, 1, 1))).is_empty());
    }

    #[test]
    fn test_explicit_disabled_dates_ignored_without_past_dates() {
        // Past dates are disallowed here, so the explicit set does not apply.
        let mut picker = picker();
        assert!(picker.is_selectable(d(2024, 1, 20)));
        assert_eq!(
            picker.handle(Command::PressDate(d(2024, 1, 20))),
            vec![Event::DateChanged(d(2024, 1, 20)), Event::ScrollWeekStrip { index: 0 }]
        );
    }

    #[test]
    fn test_press_disabled_date_emits_nothing() {
        let config = PickerConfig {
            start_date: Some(d(2024, 1, 1)),
            max_date: Some(d(2024, 1, 31)),
            disabled_dates: [d(2024, 1, 20)].into_iter().collect(),
            allows_past_dates: true,
            ..PickerConfig::default()
        };
        let mut picker = DatePicker::new(&config, d(2024, 1, 15));
        assert!(picker.handle(Command::PressDate(d(2024, 1, 20))).is_empty());
        assert!(!picker.handle(Command::PressDate(d(2024, 1, 2))).is_empty());
    }

    #[test]
    fn test_go_to_today() {
        let mut picker = picker();
        assert_eq!(
            picker.handle(Command::GoToToday),
            vec![Event::DateChanged(d(2024, 1, 15)), Event::ScrollWeekStrip { index: 0 }]
        );
    }

    #[test]
    fn test_scroll_to_does_not_request_change() {
        let mut picker = picker();
        assert_eq!(
            picker.handle(Command::ScrollTo(d(2024, 3, 6))),
            vec![Event::ScrollWeekStrip { index: 49 }]
        );
        assert!(picker.handle(Command::ScrollTo(d(2023, 3, 6))).is_empty());
    }

    #[test]
    fn test_toggle_view() {
        let mut picker = picker();
        assert_eq!(
            picker.handle(Command::ToggleView),
            vec![Event::ViewChanged(ViewMode::Month), Event::ScrollMonthGridToTop]
        );
        assert_eq!(picker.view_mode(), ViewMode::Month);
        assert_eq!(picker.handle(Command::ToggleView), vec![Event::ViewChanged(ViewMode::Week)]);
    }

    #[test]
    fn test_reached_bottom_loads_once() {
        let mut picker = picker();
        assert_eq!(picker.months().len(), 5);
        assert_eq!(picker.total_months(), 12);
        assert_eq!(picker.handle(Command::ReachedBottom), vec![Event::MonthsLoaded { total: 12 }]);
        assert!(picker.is_fully_loaded());
        assert!(picker.handle(Command::ReachedBottom).is_empty());
    }

    #[test]
    fn test_month_grid_disables_days_before_start() {
        let picker = picker();
        let january = &picker.months()[0];
        assert_eq!(january.days().len(), 31);
        assert!(january.days()[..14].iter().all(|day| day.is_disabled));
        assert!(!january.days()[14].is_disabled);
        assert!(january.days()[14].is_selected);
    }

    #[test]
    fn test_months_follow_host_selection() {
        let mut picker = picker();
        picker.handle(Command::SetSelectedDate(d(2024, 2, 1)));
        let selected: Vec<_> = picker
            .months()
            .iter()
            .flat_map(|month| month.days().to_vec())
            .filter(|day| day.is_selected)
            .map(|day| day.date)
            .collect();
        assert_eq!(selected, vec![d(2024, 2, 1)]);
    }

    #[test]
    fn test_initial_scroll_and_marks() {
        let config = PickerConfig {
            start_date: Some(d(2024, 1, 15)),
            max_date: Some(d(2024, 3, 31)),
            selected_date: Some(d(2024, 2, 1)),
            marked_dates: [d(2024, 2, 1)].into_iter().collect(),
            ..PickerConfig::default()
        };
        let picker = DatePicker::new(&config, d(2024, 1, 15));
        assert_eq!(picker.initial_scroll(), Some(14));
        assert!(picker.is_marked(d(2024, 2, 1)));
        assert!(!picker.is_marked(d(2024, 2, 2)));
        assert!(picker.is_today(d(2024, 1, 15)));
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&Event::ScrollWeekStrip { index: 7 }).unwrap();
        assert_eq!(json, r#"{"event":"scroll_week_strip","data":{"index":7}}"#);
        let json = serde_json::to_string(&Event::ViewChanged(ViewMode::Month)).unwrap();
        assert_eq!(json, r#"{"event":"view_changed","data":"month"}"#);
    }
}
