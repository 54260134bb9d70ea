//! The currently selected date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selected date, owned by the host.
///
/// The picker never changes it on its own; a tap only produces a
/// [`crate::picker::Event::DateChanged`] request which the host applies with
/// [`SelectionState::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    selected: NaiveDate,
}

impl SelectionState {
    pub fn new(selected: NaiveDate) -> Self {
        Self { selected }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Replace the selection.  No bounds or disabled-date checks are made.
    #[must_use]
    pub fn select(self, date: NaiveDate) -> Self {
        Self { selected: date }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == date
    }
}
