// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oversave::feed::{
    DateFilter, FetchSeq, Filters, TransactionFeed, format_day_header, group_by_day,
};
use oversave::models::{CashflowRecord, TransactionKind};

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

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn feed_merges_streams_newest_first() {
    let income = vec![record("500", "Paycheck", "2024-11-01T09:00:00", None)];
    let expenses = vec![
        record("12.50", "Lunch", "2024-11-02T12:30:00", Some("Food")),
        record("40", "Gas", "2024-10-28T08:00:00", Some("Transport")),
    ];
    let feed = TransactionFeed::from_records(income, expenses);
    let descriptions: Vec<&str> = feed
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Lunch", "Paycheck", "Gas"]);
    assert_eq!(feed.transactions[1].kind, TransactionKind::Income);
    assert_eq!(feed.transactions[1].icon, "💰");
}

#[test]
fn feed_defaults_missing_category_by_kind() {
    let income = vec![record("100", "Refund", "2024-11-01T09:00:00", None)];
    let expenses = vec![record("5", "Coffee", "2024-11-01T10:00:00", None)];
    let feed = TransactionFeed::from_records(income, expenses);
    let by_desc = |d: &str| {
        feed.transactions
            .iter()
            .find(|t| t.description == d)
            .unwrap()
    };
    assert_eq!(by_desc("Refund").category, "Income");
    assert_eq!(by_desc("Coffee").category, "Uncategorized");
}

#[test]
fn feed_falls_back_to_created_at() {
    let expenses = vec![CashflowRecord {
        amount: Decimal::new(700, 2),
        description: Some("Snack".to_string()),
        occurred_at: None,
        created_at: Some("2024-11-03T08:15:00".to_string()),
        category_name: None,
        updated_balance: None,
    }];
    let feed = TransactionFeed::from_records(vec![], expenses);
    assert_eq!(feed.transactions[0].occurred_at.date(), day(2024, 11, 3));
}

#[test]
fn search_matches_description_and_category() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![
            record("10", "Lunch at cafe", "2024-11-01T12:00:00", Some("Food")),
            record("20", "Bus pass", "2024-11-01T13:00:00", Some("Transport")),
        ],
    );
    let today = day(2024, 11, 1);
    let by_description = Filters {
        search: Some("CAFE".to_string()),
        ..Filters::default()
    };
    assert_eq!(feed.filtered(&by_description, today).len(), 1);
    let by_category = Filters {
        search: Some("transport".to_string()),
        ..Filters::default()
    };
    assert_eq!(
        feed.filtered(&by_category, today)[0].description,
        "Bus pass"
    );
}

#[test]
fn filters_are_conjunctive() {
    let feed = TransactionFeed::from_records(
        vec![record("100", "Gift", "2024-11-01T09:00:00", None)],
        vec![record("10", "Lunch", "2024-11-01T12:00:00", Some("Food"))],
    );
    let today = day(2024, 11, 1);
    let filters = Filters {
        search: Some("lunch".to_string()),
        kind: Some(TransactionKind::Income),
        ..Filters::default()
    };
    assert!(feed.filtered(&filters, today).is_empty());
}

#[test]
fn category_filter_matches_slug_against_display_name() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![record(
            "10",
            "Groceries run",
            "2024-11-01T12:00:00",
            Some("Food & Dining"),
        )],
    );
    let filters = Filters {
        category: Some("food".to_string()),
        ..Filters::default()
    };
    assert_eq!(feed.filtered(&filters, day(2024, 11, 1)).len(), 1);
}

#[test]
fn week_filter_is_a_rolling_seven_days() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![
            record("1", "In range", "2024-11-01T00:00:00", None),
            record("2", "Out of range", "2024-10-25T23:59:59", None),
            record("3", "Future", "2024-11-02T00:00:00", None),
        ],
    );
    let today = day(2024, 11, 1);
    let filters = Filters {
        date: DateFilter::Week,
        ..Filters::default()
    };
    let visible = feed.filtered(&filters, today);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].description, "In range");
}

#[test]
fn month_and_year_filters_use_the_calendar() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![
            record("1", "This month", "2024-11-05T10:00:00", None),
            record("2", "Last month", "2024-10-31T10:00:00", None),
            record("3", "Last year", "2023-11-05T10:00:00", None),
        ],
    );
    let today = day(2024, 11, 20);
    let month = Filters {
        date: DateFilter::Month,
        ..Filters::default()
    };
    assert_eq!(feed.filtered(&month, today).len(), 1);
    let year = Filters {
        date: DateFilter::Year,
        ..Filters::default()
    };
    assert_eq!(feed.filtered(&year, today).len(), 2);
}

#[test]
fn day_groups_keep_newest_day_first() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![
            record("1", "A", "2024-11-02T09:00:00", None),
            record("2", "B", "2024-11-02T18:00:00", None),
            record("3", "C", "2024-11-01T12:00:00", None),
        ],
    );
    let today = day(2024, 11, 2);
    let visible = feed.filtered(&Filters::default(), today);
    let groups = group_by_day(&visible, today);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].header, "Today, Nov 2");
    assert_eq!(groups[0].transactions[0].description, "B");
    assert_eq!(groups[1].header, "Yesterday, Nov 1");
}

#[test]
fn day_headers_name_today_yesterday_and_older() {
    let today = day(2024, 11, 1);
    assert_eq!(format_day_header(today, today), "Today, Nov 1");
    assert_eq!(
        format_day_header(day(2024, 10, 31), today),
        "Yesterday, Oct 31"
    );
    assert_eq!(format_day_header(day(2024, 10, 5), today), "Oct 5, 2024");
    assert_eq!(format_day_header(day(2023, 12, 25), today), "Dec 25, 2023");
}

#[test]
fn summary_ignores_filters() {
    let feed = TransactionFeed::from_records(
        vec![record("500", "Paycheck", "2024-11-01T09:00:00", None)],
        vec![record("120.50", "Bills", "2024-11-02T09:00:00", None)],
    );
    let s = feed.summary();
    assert_eq!(s.income, Decimal::new(500, 0));
    assert_eq!(s.expenses, "120.50".parse::<Decimal>().unwrap());
    assert_eq!(s.net, "379.50".parse::<Decimal>().unwrap());
    assert_eq!(s.count, 2);
}

#[test]
fn stale_fetch_does_not_commit() {
    let seq = FetchSeq::new();
    let first = seq.begin();
    let second = seq.begin();
    // The older response arrives after the newer one was issued.
    assert!(!seq.try_commit(first));
    assert!(seq.try_commit(second));
    assert_eq!(seq.last_applied(), second);
    // Replaying the stale ticket still changes nothing.
    assert!(!seq.try_commit(first));
    assert_eq!(seq.last_applied(), second);
}
