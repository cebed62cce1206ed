use serde::{Deserialize, Serialize};
use strum::Display;

/// High-level mutations the widget chrome feeds into a table engine.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
pub enum Action {
    /// User toggled one option of a token-set filter (Discrete options or
    /// Amount thresholds)
    SetDiscreteToken {
        column: String,
        token: String,
        selected: bool,
    },
    /// User typed into a column's search box; empty text clears the filter
    SetSubstringToken { column: String, text: String },
    /// User typed into a column's amount box (`100` exact, `100+` for
    /// greater-or-equal); empty text clears the filter
    SetAmountToken { column: String, text: String },
    /// User changed a column's date-range inputs; both bounds absent clears
    /// the filter
    SetDateRangeTokens {
        column: String,
        start: Option<String>,
        end: Option<String>,
    },
    /// User clicked a column's sort control
    ActivateSort { column: String },
    /// User requested a full data refresh; routed to the refresh service by
    /// the caller, not handled by the engine itself
    Refresh,
}
