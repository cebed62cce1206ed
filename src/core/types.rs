use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for table engine instances
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(Uuid);

impl TableId {
    /// Create a new unique table ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the ID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TableId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s).map_err(|e| e.to_string())?))
    }
}

/// Filter kind declared for a column
///
/// A closed set: predicate dispatch matches on it exhaustively, so adding a
/// kind is a compile-time-checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Column carries no filter control
    None,
    /// Checkbox set of option values; a row passes if any selected value is
    /// contained in the cell value
    Discrete,
    /// Case-insensitive search over the display text
    Substring,
    /// Single numeric token: `100` matches exactly, `100+` matches `>= 100`
    ExactOrThreshold,
    /// `dd/mm/yyyy` start/end bounds, either side optional
    DateRange,
    /// Set of numeric thresholds; a row passes if `>=` the largest
    Amount,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Discrete => "discrete",
            Self::Substring => "substring",
            Self::ExactOrThreshold => "amount-or-threshold",
            Self::DateRange => "date-range",
            Self::Amount => "amount",
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "discrete" => Ok(Self::Discrete),
            "substring" => Ok(Self::Substring),
            "amount-or-threshold" => Ok(Self::ExactOrThreshold),
            "date-range" => Ok(Self::DateRange),
            "amount" => Ok(Self::Amount),
            _ => Err(format!("Unknown filter kind: {}", s)),
        }
    }
}

/// Static per-column configuration, captured once at table construction
///
/// The descriptor's position in the table's descriptor list is the cell
/// position rows are addressed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Stable identifier, unique per table
    pub id: String,
    pub kind: FilterKind,
    /// Option values offered by a Discrete filter dropdown
    #[serde(default)]
    pub discrete_options: Vec<String>,
}

impl ColumnDescriptor {
    pub fn new<S: Into<String>>(id: S, kind: FilterKind) -> Self {
        Self {
            id: id.into(),
            kind,
            discrete_options: Vec::new(),
        }
    }

    /// Attach the option list offered by a Discrete filter
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.discrete_options = options;
        self
    }
}
