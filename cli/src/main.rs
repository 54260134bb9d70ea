//! Weekmonth – terminal front-end for the week/month date picker.
//!
//! This binary:
//! 1. Reads picker settings from `weekmonth.conf` (or `--config`)
//! 2. Builds the picker for today (or `--today`)
//! 3. Prints the week strip or month grid, resolves a scroll target, or
//!    replays taps and prints the events the picker emits.

mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use weekmonth_common::config::{self, PickerConfig};
use weekmonth_common::date::parse_date;
use weekmonth_common::picker::{Command, DatePicker, Event};

use crate::render::Renderer;

#[derive(Debug, Parser)]
#[command(name = "weekmonth", version, about = "Week/month date picker in the terminal")]
struct Cli {
    /// Picker config: KEY=VALUE, or TOML when the path ends in `.toml`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colours in text output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    view: View,
}

#[derive(Debug, Subcommand)]
enum View {
    /// Show the week strip, seven days per line.
    Week,
    /// Show the month grid.
    Month {
        /// Only the months materialised up front.
        #[arg(long)]
        initial_only: bool,
    },
    /// Resolve the week-strip index to scroll to for a date.
    Scroll {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Tap dates in order and print the resulting events.
    Tap {
        #[arg(value_parser = parse_date, required = true)]
        dates: Vec<NaiveDate>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── load config ──────────────────────────────────────────────────
    let settings = load_config(cli.config.as_deref())?;
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let mut picker = DatePicker::new(&settings, today);

    info!(
        "Picker ready: {} → {} (today {today})",
        picker.range().start_date,
        picker.range().end_date
    );

    let color = !cli.no_color;
    match cli.view {
        View::Week => {
            if cli.json {
                print_json(&picker.week_strip())?;
            } else {
                print!("{}", renderer(&picker, &settings, color).week_strip());
            }
        }
        View::Month { initial_only } => {
            if !initial_only {
                picker.handle(Command::ReachedBottom);
            }
            if cli.json {
                print_json(&picker.months())?;
            } else {
                print!("{}", renderer(&picker, &settings, color).month_grid());
            }
        }
        View::Scroll { date } => {
            let events = picker.handle(Command::ScrollTo(date));
            if cli.json {
                print_json(&events)?;
            } else {
                match events.first() {
                    Some(Event::ScrollWeekStrip { index }) => println!("{index}"),
                    _ => println!("no scroll"),
                }
            }
        }
        View::Tap { dates } => {
            let events = replay_taps(&mut picker, &dates);
            if cli.json {
                print_json(&events)?;
            } else {
                for event in &events {
                    println!("{event:?}");
                }
                println!("selected: {}", picker.selection().selected());
            }
        }
    }

    Ok(())
}

/// Explicit path, else `weekmonth.conf` when present, else defaults.
fn load_config(path: Option<&Path>) -> Result<PickerConfig> {
    match path {
        Some(path) => config::load(path).context("Config load failed"),
        None => {
            let default = Path::new(PickerConfig::default_path());
            if default.exists() {
                config::load(default).context("Config load failed")
            } else {
                Ok(PickerConfig::default())
            }
        }
    }
}

fn renderer<'a>(picker: &'a DatePicker, settings: &'a PickerConfig, color: bool) -> Renderer<'a> {
    Renderer {
        picker,
        theme: settings.theme,
        locale: &settings.locale,
        color,
    }
}

/// Press each date, confirming every requested change the way a host would.
fn replay_taps(picker: &mut DatePicker, dates: &[NaiveDate]) -> Vec<Event> {
    let mut emitted = Vec::new();
    for &date in dates {
        let events = picker.handle(Command::PressDate(date));
        for event in &events {
            if let Event::DateChanged(changed) = event {
                picker.handle(Command::SetSelectedDate(*changed));
            }
        }
        emitted.extend(events);
    }
    emitted
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Cannot serialise output")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_replay_taps_confirms_selection() {
        let settings = PickerConfig {
            start_date: Some(d(2024, 1, 15)),
            max_date: Some(d(2024, 3, 31)),
            ..PickerConfig::default()
        };
        let mut picker = DatePicker::new(&settings, d(2024, 1, 15));
        let events = replay_taps(&mut picker, &[d(2024, 1, 10), d(2024, 2, 1)]);
        assert_eq!(
            events,
            vec![Event::DateChanged(d(2024, 2, 1)), Event::ScrollWeekStrip { index: 14 }]
        );
        assert_eq!(picker.selection().selected(), d(2024, 2, 1));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["weekmonth", "--today", "2024-01-15", "tap", "2024-02-01"]).unwrap();
        assert_eq!(cli.today, Some(d(2024, 1, 15)));
        assert!(matches!(cli.view, View::Tap { ref dates } if dates == &vec![d(2024, 2, 1)]));

        let cli = Cli::try_parse_from(["weekmonth", "month", "--initial-only", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.view, View::Month { initial_only: true }));

        assert!(Cli::try_parse_from(["weekmonth", "scroll", "tomorrow"]).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let path = std::env::temp_dir().join("weekmonth_cli_test").join("missing.conf");
        assert!(load_config(Some(&path)).is_err());
    }
}
