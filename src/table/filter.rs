//! Filter state store and per-column predicate evaluation

use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::row::Row;
use crate::core::types::{ColumnDescriptor, FilterKind};
use crate::core::value::{DateToken, parse_amount, parse_date};

/// Live mapping of column id to active filter tokens
///
/// Holds non-empty token lists only: an entry is removed outright the
/// moment its effective filter empties, so absence of a key always means
/// "no filter on this column".
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut,
)]
pub struct FilterState(pub BTreeMap<String, Vec<String>>);

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one selected value of a token-set filter (Discrete options,
    /// Amount thresholds)
    pub fn set_discrete_token(&mut self, column: &str, token: &str, selected: bool) {
        let tokens = self.0.entry(column.to_string()).or_default();
        if selected {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        } else {
            tokens.retain(|t| t != token);
        }
        let now_empty = tokens.is_empty();
        if now_empty {
            self.0.remove(column);
        }
    }

    /// Replace a column's search text; empty text clears the filter
    pub fn set_substring_token(&mut self, column: &str, text: &str) {
        self.set_single_token(column, text);
    }

    /// Replace a column's amount token (`100` exact, `100+` threshold);
    /// empty text clears the filter
    pub fn set_amount_token(&mut self, column: &str, text: &str) {
        self.set_single_token(column, text);
    }

    /// Replace a column's date-range bounds; both bounds absent clears the
    /// filter. An absent bound is stored as an empty token so the entry
    /// always holds exactly two.
    pub fn set_date_range_tokens(&mut self, column: &str, start: Option<&str>, end: Option<&str>) {
        let start = start.unwrap_or("").trim();
        let end = end.unwrap_or("").trim();
        if start.is_empty() && end.is_empty() {
            self.0.remove(column);
        } else {
            self.0
                .insert(column.to_string(), vec![start.to_string(), end.to_string()]);
        }
    }

    fn set_single_token(&mut self, column: &str, text: &str) {
        if text.is_empty() {
            self.0.remove(column);
        } else {
            self.0.insert(column.to_string(), vec![text.to_string()]);
        }
    }

    /// Number of active tokens for a column: the filter-count badge value
    pub fn token_count(&self, column: &str) -> usize {
        self.0.get(column).map(|tokens| tokens.len()).unwrap_or(0)
    }

    /// Serialize active filters as query pairs, one per column, tokens
    /// comma-joined
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(column, tokens)| (column.clone(), tokens.join(",")))
            .collect()
    }
}

/// Decide whether a row passes one column's active filter
///
/// `position` is the column's cell position; `tokens` is the column's entry
/// in the filter state (never empty while stored).
pub fn passes(descriptor: &ColumnDescriptor, position: usize, tokens: &[String], row: &Row) -> bool {
    match descriptor.kind {
        FilterKind::None => true,
        FilterKind::Discrete => {
            let value = row.raw_value(position);
            tokens.iter().any(|token| value.contains(token.as_str()))
        }
        FilterKind::Substring => {
            let Some(token) = tokens.first() else {
                return true;
            };
            row.text(position)
                .to_lowercase()
                .contains(&token.to_lowercase())
        }
        FilterKind::ExactOrThreshold => {
            let Some(token) = tokens.first() else {
                return true;
            };
            let cell = parse_amount(row.raw_value(position));
            match token.strip_suffix('+') {
                Some(threshold) => cell >= parse_amount(threshold),
                // Exact floating equality, no tolerance
                #[allow(clippy::float_cmp)]
                None => cell == parse_amount(token),
            }
        }
        FilterKind::DateRange => {
            let DateToken::Valid(cell) = parse_date(row.raw_value(position)) else {
                debug!(
                    column = %descriptor.id,
                    value = row.raw_value(position),
                    "cell date did not parse; row excluded"
                );
                return false;
            };
            let after_start = match parse_date(tokens.first().map(String::as_str).unwrap_or("")) {
                DateToken::Absent => true,
                DateToken::Valid(start) => cell >= start,
                DateToken::Invalid => false,
            };
            let before_end = match parse_date(tokens.get(1).map(String::as_str).unwrap_or("")) {
                DateToken::Absent => true,
                DateToken::Valid(end) => cell <= end,
                DateToken::Invalid => false,
            };
            after_start && before_end
        }
        FilterKind::Amount => {
            let mut max = f64::NEG_INFINITY;
            for token in tokens {
                let threshold = parse_amount(token);
                if threshold.is_nan() {
                    debug!(column = %descriptor.id, token = %token, "threshold did not parse; nothing matches");
                    return false;
                }
                max = max.max(threshold);
            }
            parse_amount(row.raw_value(position)) >= max
        }
    }
}

/// AND-combination of every column holding an active filter
///
/// An entry referencing a column id absent from the descriptors is skipped.
/// An empty filter state makes every row visible.
pub fn row_visible(descriptors: &[ColumnDescriptor], filters: &FilterState, row: &Row) -> bool {
    filters.iter().all(|(column, tokens)| {
        match descriptors.iter().position(|d| &d.id == column) {
            Some(position) => passes(&descriptors[position], position, tokens, row),
            None => {
                warn!(column = %column, "filter references unknown column; skipped");
                true
            }
        }
    })
}
