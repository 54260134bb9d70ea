//! Date parsing and locale-aware labels.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;
use tracing::warn;

/// Wire format for dates in config files and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Locale used when none is configured or the configured one is unknown.
pub const DEFAULT_LOCALE: &str = "en_US";

/// 2024-01-01 fell on a Monday; weekday labels are formatted from it.
const REFERENCE_MONDAY: (i32, u32, u32) = (2024, 1, 1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("bad date {0:?}: expected YYYY-MM-DD")]
    Invalid(String),
}

/// Parse a single `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateError::Invalid(trimmed.to_string()))
}

/// Parse a comma-separated list of dates.  Empty entries are skipped.
pub fn parse_date_list(input: &str) -> Result<BTreeSet<NaiveDate>, DateError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_date)
        .collect()
}

/// Map a locale tag such as `fr-FR` or `de_DE` onto a chrono locale.
pub fn resolve_locale(tag: &str) -> Locale {
    let normalised = tag.trim().replace('-', "_");
    match Locale::try_from(normalised.as_str()) {
        Ok(locale) => locale,
        Err(_) => {
            warn!("Unknown locale {tag:?}, falling back to {DEFAULT_LOCALE}");
            Locale::en_US
        }
    }
}

/// Abbreviated weekday names, Monday first.
pub fn weekday_labels(locale: &str) -> [String; 7] {
    let locale = resolve_locale(locale);
    let monday = NaiveDate::from_ymd_opt(REFERENCE_MONDAY.0, REFERENCE_MONDAY.1, REFERENCE_MONDAY.2)
        .unwrap_or_default();
    std::array::from_fn(|offset| {
        let day = monday
            .checked_add_days(Days::new(offset as u64))
            .unwrap_or(monday);
        localized(day, "%a", locale)
    })
}

/// Abbreviated month name with the first letter capitalised ("Jan", "Févr.").
pub fn month_label(date: NaiveDate, locale: &str) -> String {
    capitalize(&localized(date, "%b", resolve_locale(locale)))
}

/// Day of month without a leading zero.
pub fn day_number(date: NaiveDate) -> String {
    date.day().to_string()
}

fn localized(date: NaiveDate, fmt: &str, locale: Locale) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .format_localized(fmt, locale)
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
