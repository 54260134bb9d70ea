//! Text rendering of the week strip and the month grid.
//!
//! Cells are five columns wide: a bracket pair around the day number and a
//! trailing marker dot.  `[ 5]` is selected, `< 5>` is today, `( 5)` is
//! disabled.  With colour on, the theme's day colours are applied as 24-bit
//! ANSI escapes.

use std::fmt::Write;

use chrono::Datelike;

use weekmonth_common::calendar::{CalendarDay, CalendarMonth};
use weekmonth_common::date::{day_number, month_label, weekday_labels};
use weekmonth_common::picker::DatePicker;
use weekmonth_common::theme::{Color, DayAppearance, Theme};

const DAYS_PER_WEEK: usize = 7;
const RESET: &str = "\x1b[0m";

pub struct Renderer<'a> {
    pub picker: &'a DatePicker,
    pub theme: Theme,
    pub locale: &'a str,
    pub color: bool,
}

impl Renderer<'_> {
    /// One line per page of seven days.  The page holding the selected date
    /// is flagged with `>`.
    pub fn week_strip(&self) -> String {
        let labels = weekday_labels(self.locale);
        let days = self.picker.week_strip();
        let selected = self.picker.selection().selected();
        let mut out = String::new();

        for week in days.chunks(DAYS_PER_WEEK) {
            let flag = if week.iter().any(|day| day.date == selected) { '>' } else { ' ' };
            let _ = write!(out, "{flag} ");
            for day in week {
                let weekday = &labels[day.date.weekday().num_days_from_monday() as usize];
                let _ = write!(out, "{} {}", truncate(weekday, 2), self.cell(day));
            }
            out.push('\n');
        }
        out
    }

    /// Each loaded month as a Monday-start grid.
    pub fn month_grid(&self) -> String {
        let labels = weekday_labels(self.locale);
        let mut out = String::new();

        for month in self.picker.months() {
            self.month_block(&mut out, &month, &labels);
        }

        if !self.picker.is_fully_loaded() {
            let remaining = self.picker.total_months() - self.picker.months().len();
            let _ = writeln!(out, "… {remaining} more month(s)");
        }
        out
    }

    fn month_block(&self, out: &mut String, month: &CalendarMonth, labels: &[String; 7]) {
        let _ = writeln!(
            out,
            "{} {}",
            month_label(month.first_date(), self.locale),
            month.year()
        );
        for label in labels {
            let _ = write!(out, "{:^5}", truncate(label, 3));
        }
        out.push('\n');

        let blanks = month.leading_blanks() as usize;
        let mut column = 0;
        for _ in 0..blanks {
            out.push_str("     ");
            column += 1;
        }
        for day in month.days() {
            out.push_str(&self.cell(day));
            column += 1;
            if column % DAYS_PER_WEEK == 0 {
                out.push('\n');
            }
        }
        if column % DAYS_PER_WEEK != 0 {
            out.push('\n');
        }
        out.push('\n');
    }

    fn cell(&self, day: &CalendarDay) -> String {
        let is_today = self.picker.is_today(day.date);
        let is_marked = self.picker.is_marked(day.date);
        let look = DayAppearance::resolve(day, is_today, is_marked, &self.theme);

        let (open, close) = if day.is_disabled {
            ('(', ')')
        } else if day.is_selected {
            ('[', ']')
        } else if is_today {
            ('<', '>')
        } else {
            (' ', ' ')
        };
        let dot = if look.dot.is_some() { '•' } else { ' ' };
        let text = format!("{open}{:>2}{close}", day_number(day.date));

        if !self.color {
            return format!("{text}{dot}");
        }
        let mut styled = foreground(look.text);
        if let Some(background) = look.background {
            styled.push_str(&background_escape(background));
        }
        styled.push_str(&text);
        styled.push_str(RESET);
        if let Some(dot_color) = look.dot {
            styled.push_str(&foreground(dot_color));
            styled.push(dot);
            styled.push_str(RESET);
        } else {
            styled.push(dot);
        }
        styled
    }
}

fn truncate(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

fn foreground(color: Color) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn background_escape(color: Color) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}
