//! Single-column tri-state sort

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::Display as SDisplay;

/// Direction of the active sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, SDisplay, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort column and its direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSort {
    pub column: String,
    pub direction: SortDirection,
}

impl Display for ActiveSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.column,
            match self.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            }
        )
    }
}

/// The single active ordering
///
/// At most one column is sorted at a time; `active` being `None` is the
/// unsorted state, so the column/direction invariant holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    active: Option<ActiveSort>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveSort> {
        self.active.as_ref()
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    /// Apply one activation of a column's sort control
    ///
    /// A strict 3-cycle per column: first activation sorts ascending,
    /// repeating the same column flips to descending, a third clears the
    /// sort. Activating a different column always restarts ascending,
    /// whatever that column's history.
    pub fn activate(&mut self, column: &str) {
        self.active = match self.active.take() {
            Some(current) if current.column == column => match current.direction {
                SortDirection::Ascending => Some(ActiveSort {
                    column: current.column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(ActiveSort {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Drop the active sort
    pub fn clear(&mut self) {
        self.active = None;
    }
}
