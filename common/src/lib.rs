//! Weekmonth Common – calendar generation, selection and scroll logic shared
//! by the terminal and web date pickers.

pub mod calendar;
pub mod config;
pub mod date;
pub mod picker;
pub mod scroll;
pub mod selection;
pub mod theme;
pub mod window;
