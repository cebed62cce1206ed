use serde::{Deserialize, Serialize};

/// A single rendered cell
///
/// Carries the display text plus an optional raw value override used for
/// filtering instead of the display text (e.g. an unformatted amount behind
/// a currency-formatted cell).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl Cell {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            raw: None,
        }
    }

    /// Attach a raw value override used for filtering
    pub fn with_raw<S: Into<String>>(mut self, raw: S) -> Self {
        self.raw = Some(raw.into());
        self
    }

    /// Value used for filtering: the raw override when present, else the
    /// display text
    pub fn raw_value(&self) -> &str {
        self.raw.as_deref().unwrap_or(&self.text)
    }
}

/// One rendered row: ordered cells, one per column position
///
/// Rows are only read and reordered by the engine; their content is never
/// altered. The `visible` flag is presentation state — hidden rows stay in
/// the row store and are restorable on the next recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }

    /// Build a row of plain text cells
    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|text| Cell::new(*text)).collect())
    }

    /// Display text at a column position; empty when the row has no cell
    /// there
    pub fn text(&self, position: usize) -> &str {
        self.cells.get(position).map(|c| c.text.as_str()).unwrap_or("")
    }

    /// Filter value at a column position (raw override or display text)
    pub fn raw_value(&self, position: usize) -> &str {
        self.cells.get(position).map(|c| c.raw_value()).unwrap_or("")
    }
}
