// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use oversave::commands::exporter::{EXPORT_HEADERS, export_csv};
use oversave::feed::TransactionFeed;
use oversave::models::CashflowRecord;

fn record(amount: &str, description: &str, when: &str, category: Option<&str>) -> CashflowRecord {
    CashflowRecord {
        amount: amount.parse::<Decimal>().unwrap(),
        description: Some(description.to_string()),
        occurred_at: Some(when.to_string()),
        created_at: None,
        category_name: category.map(str::to_string),
        updated_balance: None,
    }
}

#[test]
fn export_writes_the_expected_columns() {
    let feed = TransactionFeed::from_records(
        vec![record("2500", "Paycheck", "2024-11-01T09:00:00", None)],
        vec![record("12.5", "Lunch", "2024-11-02T12:30:00", Some("food"))],
    );
    let csv_text = export_csv(&feed).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next().unwrap(), EXPORT_HEADERS.join(","));
    // Feed order is newest first.
    assert_eq!(
        lines.next().unwrap(),
        "2024-11-02 12:30:00,Lunch,,Food & Dining,expense,12.50"
    );
    assert_eq!(
        lines.next().unwrap(),
        "2024-11-01 09:00:00,Paycheck,,Income,income,2500.00"
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_quotes_fields_containing_commas() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![record("5", "Coffee, large", "2024-11-01T08:00:00", None)],
    );
    let csv_text = export_csv(&feed).unwrap();
    assert!(csv_text.contains("\"Coffee, large\""));
}

#[test]
fn export_of_an_empty_feed_is_just_the_header() {
    let csv_text = export_csv(&TransactionFeed::default()).unwrap();
    assert_eq!(csv_text.trim_end(), EXPORT_HEADERS.join(","));
}
