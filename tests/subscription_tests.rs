// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oversave::models::{Frequency, Subscription, SubscriptionRequest, SubscriptionSummary};
use oversave::utils::validate_subscription_input;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn subscription(
    id: i64,
    merchant: &str,
    amount: &str,
    frequency: &str,
    active: bool,
    next_post_at: Option<&str>,
) -> Subscription {
    Subscription {
        subscription_id: id,
        merchant: merchant.to_string(),
        amount: dec(amount),
        frequency: Some(frequency.to_string()),
        start_date: Some("2024-01-01T00:00:00".to_string()),
        is_active: active,
        next_post_at: next_post_at.map(str::to_string),
        monthly_equivalent: None,
    }
}

#[test]
fn frequency_parses_case_insensitively_with_yearly_aliases() {
    assert_eq!(Frequency::parse("weekly"), Some(Frequency::Weekly));
    assert_eq!(Frequency::parse("MONTHLY"), Some(Frequency::Monthly));
    assert_eq!(Frequency::parse("  Quarterly "), Some(Frequency::Quarterly));
    assert_eq!(Frequency::parse("YEARLY"), Some(Frequency::Yearly));
    assert_eq!(Frequency::parse("ANNUAL"), Some(Frequency::Yearly));
    assert_eq!(Frequency::parse("annually"), Some(Frequency::Yearly));
    assert_eq!(Frequency::parse("daily"), None);
}

#[test]
fn frequency_labels_per_billing_period() {
    assert_eq!(Frequency::Weekly.per_label(), "/week");
    assert_eq!(Frequency::Fortnightly.per_label(), "/fortnight");
    assert_eq!(Frequency::Monthly.per_label(), "/month");
    assert_eq!(Frequency::Quarterly.per_label(), "/quarter");
    assert_eq!(Frequency::Yearly.per_label(), "/year");
}

#[test]
fn monthly_equivalent_follows_the_billing_cadence() {
    assert_eq!(Frequency::Monthly.monthly_equivalent(dec("12")), dec("12"));
    assert_eq!(Frequency::Weekly.monthly_equivalent(dec("15")), dec("65.00"));
    assert_eq!(Frequency::Weekly.monthly_equivalent(dec("10")), dec("43.33"));
    assert_eq!(
        Frequency::Fortnightly.monthly_equivalent(dec("10")),
        dec("21.67")
    );
    assert_eq!(
        Frequency::Quarterly.monthly_equivalent(dec("30")),
        dec("10.00")
    );
    assert_eq!(
        Frequency::Yearly.monthly_equivalent(dec("120")),
        dec("10.00")
    );
    assert_eq!(Frequency::Yearly.monthly_equivalent(dec("100")), dec("8.33"));
}

#[test]
fn unknown_wire_frequency_is_treated_as_monthly() {
    let mut s = subscription(1, "Mystery", "9.99", "SOMETIMES", true, None);
    assert_eq!(s.frequency(), Frequency::Monthly);
    assert_eq!(s.monthly_cost(), dec("9.99"));
    s.frequency = None;
    assert_eq!(s.frequency(), Frequency::Monthly);
}

#[test]
fn monthly_cost_prefers_the_server_value() {
    let mut s = subscription(1, "Stream", "12", "WEEKLY", true, None);
    s.monthly_equivalent = Some(dec("52.00"));
    assert_eq!(s.monthly_cost(), dec("52.00"));
    s.monthly_equivalent = None;
    assert_eq!(s.monthly_cost(), dec("52.00"));
}

#[test]
fn summary_counts_only_active_subscriptions() {
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let subs = vec![
        subscription(1, "Stream", "10", "MONTHLY", true, Some("2024-11-03T00:00:00")),
        subscription(2, "Gym", "30", "QUARTERLY", true, Some("2024-12-15T00:00:00")),
        subscription(3, "Paused", "99", "MONTHLY", false, Some("2024-11-02T00:00:00")),
    ];
    let s = SubscriptionSummary::compute(&subs, today);
    assert_eq!(s.active_count, 2);
    assert_eq!(s.monthly_total, dec("20.00"));
    assert_eq!(s.due_this_week, 1);
}

#[test]
fn due_this_week_window_is_inclusive() {
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let subs = vec![
        subscription(1, "Due today", "1", "MONTHLY", true, Some("2024-11-01T09:00:00")),
        subscription(2, "Edge", "1", "MONTHLY", true, Some("2024-11-08T00:00:00")),
        subscription(3, "Past", "1", "MONTHLY", true, Some("2024-10-31T00:00:00")),
        subscription(4, "Later", "1", "MONTHLY", true, Some("2024-11-09T00:00:00")),
        subscription(5, "Unknown", "1", "MONTHLY", true, None),
    ];
    let s = SubscriptionSummary::compute(&subs, today);
    assert_eq!(s.due_this_week, 2);
}

#[test]
fn subscription_request_uses_camel_case_keys() {
    let req = SubscriptionRequest {
        merchant: "Stream".to_string(),
        amount: dec("12.99"),
        frequency: "MONTHLY".to_string(),
        start_date: "2024-11-01T00:00:00".to_string(),
        first_post_at: Some("2024-11-01T00:00:00".to_string()),
        is_active: Some(true),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["startDate"], "2024-11-01T00:00:00");
    assert_eq!(json["firstPostAt"], "2024-11-01T00:00:00");
    assert_eq!(json["isActive"], true);
    assert_eq!(json["merchant"], "Stream");
}

#[test]
fn subscription_input_validation() {
    assert!(validate_subscription_input("Stream", dec("5")).is_empty());
    assert_eq!(
        validate_subscription_input("  ", dec("5")),
        vec!["Service name is required".to_string()]
    );
    assert_eq!(
        validate_subscription_input("Stream", Decimal::ZERO),
        vec!["Amount must be greater than 0".to_string()]
    );
    let long = "x".repeat(61);
    assert_eq!(
        validate_subscription_input(&long, dec("5")),
        vec!["Service name must be at most 60 characters".to_string()]
    );
}
