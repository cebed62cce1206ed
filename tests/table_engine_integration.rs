//! Integration tests for the table engine with realistic invoice data

use pretty_assertions::assert_eq;
use tableify::services::RefreshService;
use tableify::{Action, Cell, ColumnDescriptor, FilterKind, Row, Table};

fn create_invoice_table() -> Table {
    let mut table = Table::new(vec![
        ColumnDescriptor::new("number", FilterKind::Substring),
        ColumnDescriptor::new("status", FilterKind::Discrete).with_options(vec![
            "Paid".to_string(),
            "Unpaid".to_string(),
            "Overdue".to_string(),
        ]),
        ColumnDescriptor::new("amount", FilterKind::ExactOrThreshold),
        ColumnDescriptor::new("issued", FilterKind::DateRange),
    ]);
    table.load_rows(vec![
        Row::new(vec![
            Cell::new("INV-001"),
            Cell::new("Paid"),
            Cell::new("$50.00").with_raw("50"),
            Cell::new("31/12/2023"),
        ]),
        Row::new(vec![
            Cell::new("INV-002"),
            Cell::new("Unpaid"),
            Cell::new("$150.00").with_raw("150"),
            Cell::new("15/01/2024"),
        ]),
        Row::new(vec![
            Cell::new("INV-003"),
            Cell::new("Overdue"),
            Cell::new("$100.00").with_raw("100"),
            Cell::new("05/02/2024"),
        ]),
    ]);
    table
}

fn visible_numbers(table: &Table) -> Vec<&str> {
    table.visible_rows().map(|row| row.text(0)).collect()
}

#[test]
fn test_threshold_filter_scenario() {
    let mut table = create_invoice_table();

    // "100+" admits amounts >= 100
    table.set_amount_token("amount", "100+");
    assert_eq!(visible_numbers(&table), vec!["INV-002", "INV-003"]);

    // A plain token demands an exact match
    table.set_amount_token("amount", "100");
    assert_eq!(visible_numbers(&table), vec!["INV-003"]);

    // Clearing the text restores full visibility
    table.set_amount_token("amount", "");
    assert_eq!(visible_numbers(&table).len(), 3);
}

#[test]
fn test_date_range_filter_scenario() {
    let mut table = create_invoice_table();
    table.set_date_range_tokens("issued", Some("01/01/2024"), Some("31/01/2024"));

    assert_eq!(visible_numbers(&table), vec!["INV-002"]);
}

#[test]
fn test_discrete_filter_scenario() {
    let mut table = create_invoice_table();
    table.set_discrete_token("status", "Paid", true);

    // Containment is case-sensitive: "Unpaid" does not contain "Paid"
    assert_eq!(visible_numbers(&table), vec!["INV-001"]);

    table.set_discrete_token("status", "Overdue", true);
    assert_eq!(visible_numbers(&table), vec!["INV-001", "INV-003"]);

    // But a selected token that is a substring of a cell value does match
    table.set_discrete_token("status", "paid", true);
    assert_eq!(visible_numbers(&table), vec!["INV-001", "INV-002", "INV-003"]);
}

#[test]
fn test_three_sort_clicks_restore_original_order() {
    let mut table = create_invoice_table();
    let original: Vec<String> = visible_numbers(&table)
        .iter()
        .map(|s| s.to_string())
        .collect();

    table.activate_sort("status");
    assert_ne!(visible_numbers(&table), original);
    table.activate_sort("status");
    table.activate_sort("status");

    assert_eq!(visible_numbers(&table), original);
}

#[test]
fn test_filters_and_sort_combine_through_actions() {
    let mut table = create_invoice_table();

    table.handle_action(Action::SetSubstringToken {
        column: "number".to_string(),
        text: "inv".to_string(),
    });
    table.handle_action(Action::SetAmountToken {
        column: "amount".to_string(),
        text: "100+".to_string(),
    });
    table.handle_action(Action::ActivateSort {
        column: "number".to_string(),
    });
    table.handle_action(Action::ActivateSort {
        column: "number".to_string(),
    });

    // Substring match is case-insensitive; amounts below 100 are hidden;
    // the second activation sorts descending
    assert_eq!(visible_numbers(&table), vec!["INV-003", "INV-002"]);
    assert_eq!(table.filter_counts()["number"], 1);
    assert_eq!(table.filter_counts()["amount"], 1);
}

#[test]
fn test_refresh_payload_flows_into_table() {
    let mut table = create_invoice_table();
    table.set_date_range_tokens("issued", Some("01/03/2024"), None);
    assert_eq!(visible_numbers(&table).len(), 0);

    // The filters the service would send with the fetch
    assert_eq!(
        table.filters().filter_params(),
        vec![("issued".to_string(), "01/03/2024,".to_string())]
    );

    let payload = r#"[
        {"cells": [{"text": "INV-010"}, {"text": "Paid"}, {"text": "$75.00", "raw": "75"}, {"text": "02/03/2024"}]},
        {"cells": [{"text": "INV-011"}, {"text": "Unpaid"}, {"text": "$25.00", "raw": "25"}, {"text": "28/02/2024"}]}
    ]"#;
    let rows = RefreshService::decode_rows(payload).unwrap();
    table.apply_refresh(rows);

    // The date filter survives the refresh and hides the February invoice
    assert_eq!(visible_numbers(&table), vec!["INV-010"]);
    assert_eq!(table.filter_counts()["issued"], 2);
}
