// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use oversave::models::{BudgetBand, BudgetSummary, budget_percentage};
use oversave::utils::validate_budget_input;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn percentage_rounds_half_away_from_zero() {
    assert_eq!(budget_percentage(Decimal::ZERO, dec("100")), 0);
    assert_eq!(budget_percentage(dec("100"), dec("100")), 100);
    assert_eq!(budget_percentage(dec("84.5"), dec("100")), 85);
    assert_eq!(budget_percentage(dec("84.4"), dec("100")), 84);
    assert_eq!(budget_percentage(dec("33.33"), dec("100")), 33);
    assert_eq!(budget_percentage(dec("1"), dec("3")), 33);
    assert_eq!(budget_percentage(dec("2"), dec("3")), 67);
}

#[test]
fn zero_or_negative_budget_pins_percentage_to_zero() {
    assert_eq!(budget_percentage(dec("50"), Decimal::ZERO), 0);
    assert_eq!(budget_percentage(dec("50"), dec("-10")), 0);
}

#[test]
fn overspend_exceeds_100() {
    assert_eq!(budget_percentage(dec("250"), dec("100")), 250);
}

#[test]
fn bands_change_at_80_90_and_100() {
    assert_eq!(BudgetBand::for_percentage(79), BudgetBand::Normal);
    assert_eq!(BudgetBand::for_percentage(80), BudgetBand::High);
    assert_eq!(BudgetBand::for_percentage(89), BudgetBand::High);
    assert_eq!(BudgetBand::for_percentage(90), BudgetBand::NearLimit);
    assert_eq!(BudgetBand::for_percentage(99), BudgetBand::NearLimit);
    assert_eq!(BudgetBand::for_percentage(100), BudgetBand::Over);
    assert_eq!(BudgetBand::for_percentage(250), BudgetBand::Over);
}

#[test]
fn band_copy_and_classes() {
    assert_eq!(BudgetBand::Over.css_class(), "danger");
    assert_eq!(BudgetBand::NearLimit.css_class(), "danger");
    assert_eq!(BudgetBand::High.css_class(), "warning");
    assert_eq!(BudgetBand::Normal.css_class(), "");
    assert_eq!(BudgetBand::Over.warning_copy(), Some("🔥 Over budget!"));
    assert_eq!(BudgetBand::Normal.warning_copy(), None);
}

#[test]
fn summary_prefers_server_remaining_and_custom_name() {
    let s = BudgetSummary {
        category_id: 1,
        category_name: Some("Food".to_string()),
        year_month: Some("2024-11".to_string()),
        budget: dec("100"),
        spent: dec("30"),
        remaining: Some(dec("65")),
        custom_name: Some("Eating out".to_string()),
    };
    assert_eq!(s.remaining_amount(), dec("65"));
    assert_eq!(s.display_name(), "Eating out");

    let bare = BudgetSummary {
        remaining: None,
        custom_name: None,
        ..s
    };
    assert_eq!(bare.remaining_amount(), dec("70"));
    assert_eq!(bare.display_name(), "Food");
}

#[test]
fn budget_input_requires_a_category() {
    let errors = validate_budget_input(None, "50").unwrap_err();
    assert_eq!(errors, vec!["Please select a category".to_string()]);
}

#[test]
fn budget_input_requires_an_amount() {
    let errors = validate_budget_input(Some(1), "  ").unwrap_err();
    assert_eq!(errors, vec!["Amount is required".to_string()]);
}

#[test]
fn budget_input_rejects_garbage_zero_and_negative() {
    assert_eq!(
        validate_budget_input(Some(1), "abc").unwrap_err(),
        vec!["Amount must be a valid number".to_string()]
    );
    assert_eq!(
        validate_budget_input(Some(1), "0").unwrap_err(),
        vec!["Amount must be greater than 0".to_string()]
    );
    assert_eq!(
        validate_budget_input(Some(1), "-5").unwrap_err(),
        vec!["Amount must be greater than 0".to_string()]
    );
}

#[test]
fn budget_input_ceiling_is_inclusive() {
    assert_eq!(
        validate_budget_input(Some(1), "999999.99").unwrap(),
        dec("999999.99")
    );
    assert_eq!(
        validate_budget_input(Some(1), "1000000").unwrap_err(),
        vec!["Amount cannot exceed $999,999.99".to_string()]
    );
}

#[test]
fn budget_input_collects_every_error() {
    let errors = validate_budget_input(None, "abc").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.contains(&"Please select a category".to_string()));
    assert!(errors.contains(&"Amount must be a valid number".to_string()));
}
