//! Configuration parsing – reads either a `KEY=VALUE` file (`weekmonth.conf`)
//! or, for paths ending in `.toml`, the same settings as TOML.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calendar::DateRangeConfig;
use crate::date::{parse_date, parse_date_list, DEFAULT_LOCALE};
use crate::theme::{Color, Theme};
use crate::window::DEFAULT_INITIAL_MONTHS;

/// Future days shown when neither `max_date` nor `max_future_days` is set.
pub const DEFAULT_MAX_FUTURE_DAYS: u32 = 30;

/// Host-side picker settings.
///
/// Dates left unset fall back to "today" when the range is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    // ── range ────────────────────────────────────────────────────────
    #[serde(alias = "min_date")]
    pub start_date: Option<NaiveDate>,
    /// Takes precedence over `max_future_days`.
    pub max_date: Option<NaiveDate>,
    pub max_future_days: u32,

    // ── day flags ────────────────────────────────────────────────────
    pub disabled_dates: BTreeSet<NaiveDate>,
    pub marked_dates: BTreeSet<NaiveDate>,
    pub allows_past_dates: bool,
    pub selected_date: Option<NaiveDate>,

    // ── presentation ─────────────────────────────────────────────────
    pub locale: String,
    pub theme: Theme,
    /// Month buckets materialised before "load more".
    pub initial_months: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            max_date: None,
            max_future_days: DEFAULT_MAX_FUTURE_DAYS,
            disabled_dates: BTreeSet::new(),
            marked_dates: BTreeSet::new(),
            allows_past_dates: false,
            selected_date: None,
            locale: DEFAULT_LOCALE.to_string(),
            theme: Theme::default(),
            initial_months: DEFAULT_INITIAL_MONTHS,
        }
    }
}

impl PickerConfig {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "weekmonth.conf"
    }

    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or(today)
    }

    pub fn end(&self, today: NaiveDate) -> NaiveDate {
        let start = self.start(today);
        self.max_date.unwrap_or_else(|| {
            start
                .checked_add_days(Days::new(u64::from(self.max_future_days)))
                .unwrap_or(NaiveDate::MAX)
        })
    }

    pub fn selected(&self, today: NaiveDate) -> NaiveDate {
        self.selected_date.unwrap_or(today)
    }

    /// The generator inputs these settings describe.
    pub fn range(&self, today: NaiveDate) -> DateRangeConfig {
        DateRangeConfig::new(self.start(today), self.end(today))
            .with_disabled_dates(self.disabled_dates.iter().copied())
            .allowing_past_dates(self.allows_past_dates)
    }
}

/// Load a config file, picking the format from its extension.
pub fn load(path: &Path) -> Result<PickerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;

    let config = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&text).with_context(|| format!("Bad TOML in {}", path.display()))?
    } else {
        parse(&text).with_context(|| format!("Bad config in {}", path.display()))?
    };
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse `KEY=VALUE` settings.  Unknown keys are silently ignored.
pub fn parse(text: &str) -> Result<PickerConfig> {
    let map = parse_conf(text);
    let get = |key: &str| -> Option<String> { map.get(key).filter(|v| !v.is_empty()).cloned() };
    let get_date = |key: &str| -> Result<Option<NaiveDate>> {
        get(key)
            .map(|v| parse_date(&v))
            .transpose()
            .with_context(|| format!("Invalid {key}"))
    };
    let get_dates = |key: &str| -> Result<BTreeSet<NaiveDate>> {
        Ok(get(key)
            .map(|v| parse_date_list(&v))
            .transpose()
            .with_context(|| format!("Invalid {key}"))?
            .unwrap_or_default())
    };

    let defaults = PickerConfig::default();
    let start_date = match get_date("START_DATE")? {
        Some(date) => Some(date),
        None => get_date("MIN_DATE")?,
    };
    let primary_color = match get("PRIMARY_COLOR") {
        Some(v) => v.parse::<Color>().context("Invalid PRIMARY_COLOR")?,
        None => defaults.theme.primary_color,
    };

    Ok(PickerConfig {
        start_date,
        max_date: get_date("MAX_DATE")?,
        max_future_days: get("MAX_FUTURE_DAYS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_future_days),
        disabled_dates: get_dates("DISABLED_DATES")?,
        marked_dates: get_dates("MARKED_DATES")?,
        allows_past_dates: get("ALLOWS_PAST_DATES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.allows_past_dates),
        selected_date: get_date("SELECTED_DATE")?,
        locale: get("LOCALE").unwrap_or(defaults.locale),
        theme: Theme { primary_color },
        initial_months: get("INITIAL_MONTHS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.initial_months),
    })
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_conf() {
        let text = r##"
# comment
MIN_DATE=2024-01-15
DISABLED_DATES="2024-01-20, 2024-01-21"
PRIMARY_COLOR="#1e90ff"
"##;
        let map = parse_conf(text);
        assert_eq!(map["MIN_DATE"], "2024-01-15");
        assert_eq!(map["DISABLED_DATES"], "2024-01-20, 2024-01-21");
        assert_eq!(map["PRIMARY_COLOR"], "#1e90ff");
    }

    #[test]
    fn test_parse_full_config() {
        let text = r##"
MIN_DATE=2024-01-15
MAX_DATE=2024-03-10
DISABLED_DATES="2024-01-20,2024-01-21"
MARKED_DATES=2024-02-01
ALLOWS_PAST_DATES=true
SELECTED_DATE=2024-01-16
LOCALE=de_DE
PRIMARY_COLOR="#1e90ff"
INITIAL_MONTHS=2
UNKNOWN=ignored
"##;
        let config = parse(text).unwrap();
        assert_eq!(config.start_date, Some(d(2024, 1, 15)));
        assert_eq!(config.max_date, Some(d(2024, 3, 10)));
        assert_eq!(config.disabled_dates.len(), 2);
        assert!(config.marked_dates.contains(&d(2024, 2, 1)));
        assert!(config.allows_past_dates);
        assert_eq!(config.selected_date, Some(d(2024, 1, 16)));
        assert_eq!(config.locale, "de_DE");
        assert_eq!(config.theme.primary_color, Color::rgb(0x1e, 0x90, 0xff));
        assert_eq!(config.initial_months, 2);
    }

    #[test]
    fn test_defaults_resolve_against_today() {
        let today = d(2024, 5, 1);
        let config = parse("").unwrap();
        assert_eq!(config, PickerConfig::default());

        let range = config.range(today);
        assert_eq!(range.start_date, today);
        assert_eq!(range.end_date, d(2024, 5, 31));
        assert!(!range.allows_past_dates);
        assert_eq!(config.selected(today), today);
    }

    #[test]
    fn test_max_future_days() {
        let config = parse("START_DATE=2024-01-30\nMAX_FUTURE_DAYS=3\n").unwrap();
        assert_eq!(config.end(d(2000, 1, 1)), d(2024, 2, 2));
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(parse("MAX_DATE=2024-13-01").is_err());
        assert!(parse("DISABLED_DATES=2024-01-01,soon").is_err());
        assert!(parse("PRIMARY_COLOR=blue").is_err());
    }

    #[test]
    fn test_toml_and_conf_agree() {
        let conf = tempfile(
            "test.conf",
            "MIN_DATE=2024-01-15\nMAX_DATE=2024-03-10\nDISABLED_DATES=2024-01-20\nALLOWS_PAST_DATES=1\n",
        );
        let toml = tempfile(
            "test.toml",
            r##"
min_date = "2024-01-15"
max_date = "2024-03-10"
disabled_dates = ["2024-01-20"]
allows_past_dates = true

[theme]
primary_color = "#00f"
"##,
        );
        let today = d(2024, 1, 1);
        let from_conf = load(conf.as_path()).unwrap();
        let from_toml = load(toml.as_path()).unwrap();
        assert_eq!(from_conf.range(today), from_toml.range(today));
        assert_eq!(from_conf.theme, from_toml.theme);
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = std::env::temp_dir().join("weekmonth_test").join("does-not-exist.conf");
        assert!(load(&path).is_err());
    }

    fn tempfile(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("weekmonth_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
