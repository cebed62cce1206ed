//! The table engine: one instance per rendered table

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::action::Action;
use crate::core::row::Row;
use crate::core::types::{ColumnDescriptor, FilterKind, TableId};
use crate::core::value::parse_amount;
use crate::table::filter::{FilterState, row_visible};
use crate::table::sort::{SortDirection, SortState};

/// A table engine instance
///
/// Owns the column descriptors (captured once at construction, immutable
/// afterwards), the live filter and sort state, and the current row set.
/// Rows are kept in load order; the presentation order is a derived
/// permutation, so clearing the sort restores load order exactly and
/// repeated redraws with unchanged state are idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    descriptors: Vec<ColumnDescriptor>,
    filters: FilterState,
    sort: SortState,
    rows: Vec<Row>,
    order: Vec<usize>,
    filter_counts: BTreeMap<String, usize>,
}

impl Table {
    /// Create a new engine for one rendered table
    pub fn new(descriptors: Vec<ColumnDescriptor>) -> Self {
        let filter_counts = descriptors.iter().map(|d| (d.id.clone(), 0)).collect();
        Self {
            id: TableId::new(),
            descriptors,
            filters: FilterState::new(),
            sort: SortState::new(),
            rows: Vec::new(),
            order: Vec::new(),
            filter_counts,
        }
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.descriptors
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Rows in load order, visibility flags included
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Presentation permutation over `rows()`
    pub fn row_order(&self) -> &[usize] {
        &self.order
    }

    /// All rows in presentation order, hidden rows included
    pub fn presented_rows(&self) -> impl Iterator<Item = &Row> {
        self.order.iter().map(|&index| &self.rows[index])
    }

    /// Visible rows in presentation order
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.presented_rows().filter(|row| row.visible)
    }

    /// Per-column filter-count badge values (0 means no badge shown)
    pub fn filter_counts(&self) -> &BTreeMap<String, usize> {
        &self.filter_counts
    }

    /// Install the initial row set, replacing whatever was loaded before
    pub fn load_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.redraw();
    }

    /// Replace the row set wholesale after a data refresh
    ///
    /// Filter and sort state survive untouched; the evaluator runs again so
    /// current filters and ordering apply to the new rows.
    pub fn apply_refresh(&mut self, rows: Vec<Row>) {
        debug!(rows = rows.len(), table = %self.id, "replacing row set from refresh");
        self.load_rows(rows);
    }

    /// Toggle one selected value of a token-set filter
    pub fn set_discrete_token(&mut self, column: &str, token: &str, selected: bool) {
        if !self.has_column(column) {
            warn!(column, "discrete filter for unknown column ignored");
            return;
        }
        self.filters.set_discrete_token(column, token, selected);
        self.redraw();
    }

    /// Replace a column's search text; empty text clears the filter
    pub fn set_substring_token(&mut self, column: &str, text: &str) {
        if !self.has_column(column) {
            warn!(column, "substring filter for unknown column ignored");
            return;
        }
        self.filters.set_substring_token(column, text);
        self.redraw();
    }

    /// Replace a column's amount token; empty text clears the filter
    pub fn set_amount_token(&mut self, column: &str, text: &str) {
        if !self.has_column(column) {
            warn!(column, "amount filter for unknown column ignored");
            return;
        }
        self.filters.set_amount_token(column, text);
        self.redraw();
    }

    /// Replace a column's date-range bounds; both absent clears the filter
    pub fn set_date_range_tokens(&mut self, column: &str, start: Option<&str>, end: Option<&str>) {
        if !self.has_column(column) {
            warn!(column, "date-range filter for unknown column ignored");
            return;
        }
        self.filters.set_date_range_tokens(column, start, end);
        self.redraw();
    }

    /// One click on a column's sort control
    pub fn activate_sort(&mut self, column: &str) {
        if !self.has_column(column) {
            warn!(column, "sort activation for unknown column ignored");
            return;
        }
        self.sort.activate(column);
        self.redraw();
    }

    /// Dispatch a chrome-originated action to the matching entry point
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::SetDiscreteToken {
                column,
                token,
                selected,
            } => self.set_discrete_token(&column, &token, selected),
            Action::SetSubstringToken { column, text } => {
                self.set_substring_token(&column, &text)
            }
            Action::SetAmountToken { column, text } => self.set_amount_token(&column, &text),
            Action::SetDateRangeTokens { column, start, end } => {
                self.set_date_range_tokens(&column, start.as_deref(), end.as_deref())
            }
            Action::ActivateSort { column } => self.activate_sort(&column),
            Action::Refresh => {
                debug!("refresh action reaches the engine only via apply_refresh");
            }
        }
    }

    /// Recompute visibility, presentation order, and badge counts from the
    /// current state
    ///
    /// A total recomputation over the full row set: hidden rows stay in the
    /// store, the unsorted order is always the load order, and a sorted
    /// order is derived from the load order with a stable comparison, so
    /// calling this twice with unchanged state yields an identical result.
    pub fn redraw(&mut self) {
        for row in &mut self.rows {
            let visible = row_visible(&self.descriptors, &self.filters, row);
            row.visible = visible;
        }

        self.order = (0..self.rows.len()).collect();
        if let Some(active) = self.sort.active() {
            match self.descriptors.iter().position(|d| d.id == active.column) {
                Some(position) => {
                    let numeric = self.descriptors[position].kind == FilterKind::Amount;
                    let rows = &self.rows;
                    let direction = active.direction;
                    self.order.sort_by(|&a, &b| {
                        let ord = if numeric {
                            compare_numeric(rows[a].text(position), rows[b].text(position))
                        } else {
                            rows[a].text(position).cmp(rows[b].text(position))
                        };
                        match direction {
                            SortDirection::Ascending => ord,
                            SortDirection::Descending => ord.reverse(),
                        }
                    });
                }
                None => {
                    warn!(column = %active.column, "sort references unknown column; keeping load order");
                }
            }
        }

        self.filter_counts = self
            .descriptors
            .iter()
            .map(|d| (d.id.clone(), self.filters.token_count(&d.id)))
            .collect();
    }

    fn has_column(&self, column: &str) -> bool {
        self.descriptors.iter().any(|d| d.id == column)
    }
}

/// Numeric comparison on display text; incomparable values (NaN) compare
/// equal so the stable sort leaves them in place
fn compare_numeric(a: &str, b: &str) -> Ordering {
    parse_amount(a)
        .partial_cmp(&parse_amount(b))
        .unwrap_or(Ordering::Equal)
}
