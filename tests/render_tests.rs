// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oversave::feed::{Filters, TransactionFeed};
use oversave::models::{BudgetSummary, CashflowRecord, Goal, GoalStatus};
use oversave::render::{
    escape_html, render_budget_alerts, render_budget_card, render_fetch_error, render_goal_card,
    render_transaction_list,
};

fn expense(amount: &str, description: &str, when: &str) -> CashflowRecord {
    CashflowRecord {
        amount: amount.parse::<Decimal>().unwrap(),
        description: Some(description.to_string()),
        occurred_at: Some(when.to_string()),
        created_at: None,
        category_name: Some("Food".to_string()),
        updated_balance: None,
    }
}

fn budget(spent: &str, limit: &str) -> BudgetSummary {
    BudgetSummary {
        category_id: 7,
        category_name: Some("Food".to_string()),
        year_month: None,
        budget: limit.parse().unwrap(),
        spent: spent.parse().unwrap(),
        remaining: None,
        custom_name: None,
    }
}

#[test]
fn rendering_is_deterministic() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![
            expense("12.50", "Lunch", "2024-11-01T12:00:00"),
            expense("40", "Dinner", "2024-10-30T19:00:00"),
        ],
    );
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let visible = feed.filtered(&Filters::default(), today);
    let first = render_transaction_list(&visible, today);
    let second = render_transaction_list(&visible, today);
    assert_eq!(first, second);
    assert!(first.contains("Today, Nov 1"));
    assert!(first.contains("transaction-date-group"));
    assert!(first.contains("-$12.50"));
}

#[test]
fn empty_feed_renders_the_empty_state() {
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let html = render_transaction_list(&[], today);
    assert!(html.contains("empty-state"));
    assert!(html.contains("No transactions yet"));
}

#[test]
fn descriptions_are_html_escaped() {
    let feed = TransactionFeed::from_records(
        vec![],
        vec![expense("5", "<script>alert('x')</script>", "2024-11-01T12:00:00")],
    );
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let visible = feed.filtered(&Filters::default(), today);
    let html = render_transaction_list(&visible, today);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn escape_handles_every_special_character() {
    assert_eq!(
        escape_html(r#"<a href="x">&'"#),
        "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
    );
}

#[test]
fn fetch_error_offers_a_retry() {
    let html = render_fetch_error("timed out");
    assert!(html.contains("retry-fetch"));
    assert!(html.contains("timed out"));
}

#[test]
fn budget_card_clamps_the_bar_at_100() {
    let html = render_budget_card(&budget("250", "100"));
    assert!(html.contains("width:100%"));
    assert!(html.contains("250% used"));
    assert!(html.contains("🔥 Over budget!"));
    assert!(html.contains("progress-fill danger"));
}

#[test]
fn budget_card_reflects_each_band() {
    let warning = render_budget_card(&budget("85", "100"));
    assert!(warning.contains("progress-fill warning"));
    assert!(warning.contains("⚠️ High usage"));

    let near = render_budget_card(&budget("92", "100"));
    assert!(near.contains("progress-fill danger"));
    assert!(near.contains("🔥 Over limit risk"));

    let normal = render_budget_card(&budget("10", "100"));
    assert!(normal.contains("class=\"progress-fill\""));
    assert!(!normal.contains("🔥"));
    assert!(!normal.contains("⚠️"));
}

#[test]
fn budget_alerts_skip_healthy_budgets() {
    let html = render_budget_alerts(&[budget("10", "100"), budget("85", "100"), budget("120", "100")]);
    assert_eq!(html.matches("budget-alert").count(), 2);
    assert!(html.contains("budget-alert warning"));
    assert!(html.contains("budget-alert danger"));
}

#[test]
fn goal_card_shows_completion_badge() {
    let done = Goal {
        id: 1,
        name: "Emergency fund".to_string(),
        target_amount: Decimal::new(1000, 0),
        current_amount: Decimal::new(1000, 0),
        due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        status: GoalStatus::Achieved,
    };
    let html = render_goal_card(&done);
    assert!(html.contains("✅ COMPLETED"));
    assert!(html.contains("width:100.0%"));

    let active = Goal {
        current_amount: Decimal::new(400, 0),
        status: GoalStatus::Active,
        ..done
    };
    let html = render_goal_card(&active);
    assert!(!html.contains("COMPLETED"));
    assert!(html.contains("40.0%"));
}
