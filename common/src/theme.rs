//! Theming hook: a primary colour and the per-day colours derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::CalendarDay;

/// An sRGB colour written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Text of disabled days.
    pub const DISABLED: Color = Color::rgb(0xcc, 0xcc, 0xcc);
    /// Text on a selected day.
    pub const ON_SELECTED: Color = Color::rgb(0xdd, 0xdd, 0xdd);
    /// Background of a selected day that is not today.
    pub const SELECTED: Color = Color::rgb(0x33, 0x33, 0x33);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("bad colour {0:?}: expected #rgb or #rrggbb")]
    Invalid(String),
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::Invalid(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let double = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Color::rgb(double(0)?, double(1)?, double(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: Color::BLUE,
        }
    }
}

/// Colours of one rendered day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAppearance {
    pub text: Color,
    pub background: Option<Color>,
    /// Marker dot, present only for marked, enabled days.
    pub dot: Option<Color>,
}

impl DayAppearance {
    pub fn resolve(day: &CalendarDay, is_today: bool, is_marked: bool, theme: &Theme) -> Self {
        if day.is_disabled {
            return Self {
                text: Color::DISABLED,
                background: None,
                dot: None,
            };
        }

        let mut text = if is_today { theme.primary_color } else { Color::BLACK };
        let mut background = None;
        if day.is_selected {
            text = Color::ON_SELECTED;
            background = Some(if is_today {
                theme.primary_color
            } else {
                Color::SELECTED
            });
        }

        let dot = is_marked.then(|| background.unwrap_or(theme.primary_color));
        Self {
            text,
            background,
            dot,
        }
    }
}
