// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oversave::models::{Goal, GoalStatus, Milestone};
use oversave::utils::validate_goal_input;

fn goal(current: &str, target: &str) -> Goal {
    Goal {
        id: 1,
        name: "Vacation".to_string(),
        target_amount: target.parse().unwrap(),
        current_amount: current.parse().unwrap(),
        due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        status: GoalStatus::Active,
    }
}

#[test]
fn goal_percentage_and_remaining() {
    let g = goal("250", "1000");
    assert_eq!(g.percentage(), 25.0);
    assert_eq!(g.remaining(), Decimal::new(750, 0));
    assert!(!g.is_achieved());
}

#[test]
fn overfunded_goal_is_achieved_with_zero_remaining() {
    let g = goal("1100", "1000");
    assert!(g.is_achieved());
    assert_eq!(g.remaining(), Decimal::ZERO);
}

#[test]
fn zero_target_pins_percentage_to_zero() {
    assert_eq!(goal("50", "0").percentage(), 0.0);
}

#[test]
fn exactly_one_milestone_fires_per_contribution() {
    // A jump over several tiers reports only the highest.
    assert_eq!(Milestone::crossed(10.0, 60.0), Some(Milestone::Half));
    assert_eq!(
        Milestone::crossed(10.0, 80.0),
        Some(Milestone::ThreeQuarters)
    );
    assert_eq!(Milestone::crossed(0.0, 25.0), Some(Milestone::Quarter));
    // 40 -> 55 crosses only the 50% tier.
    assert_eq!(Milestone::crossed(40.0, 55.0), Some(Milestone::Half));
}

#[test]
fn completion_wins_over_lower_tiers() {
    assert_eq!(Milestone::crossed(10.0, 100.0), Some(Milestone::Completed));
    assert_eq!(Milestone::crossed(99.0, 120.0), Some(Milestone::Completed));
}

#[test]
fn no_milestone_without_a_crossing() {
    assert_eq!(Milestone::crossed(30.0, 40.0), None);
    assert_eq!(Milestone::crossed(50.0, 60.0), None);
    // Already past the tier before the contribution.
    assert_eq!(Milestone::crossed(76.0, 80.0), None);
}

#[test]
fn milestone_rewards_and_labels() {
    assert_eq!(Milestone::Quarter.coin_reward(), 25);
    assert_eq!(Milestone::Half.coin_reward(), 50);
    assert_eq!(Milestone::ThreeQuarters.coin_reward(), 75);
    assert_eq!(Milestone::Completed.coin_reward(), 150);
    assert_eq!(Milestone::Quarter.grant_label(), "25% milestone reached");
    assert_eq!(
        Milestone::Completed.grant_label(),
        "Savings milestone reached"
    );
}

#[test]
fn goal_input_collects_every_error() {
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let errors = validate_goal_input("  ", Decimal::ZERO, None, today);
    assert_eq!(
        errors,
        vec![
            "Goal name is required".to_string(),
            "Target amount must be greater than 0".to_string(),
            "Due date is required".to_string(),
        ]
    );
}

#[test]
fn goal_due_date_must_not_be_past() {
    let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
    let past = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
    let errors = validate_goal_input("Trip", Decimal::new(100, 0), Some(past), today);
    assert_eq!(errors, vec!["Due date must be in the future".to_string()]);
    // Today itself is accepted.
    assert!(validate_goal_input("Trip", Decimal::new(100, 0), Some(today), today).is_empty());
}
