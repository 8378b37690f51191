// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-facing notifications as an explicit seam. Callers receive a
//! `&dyn Notifier`; every hook has a no-op default so library code never
//! needs a null check.

use crate::models::Milestone;

pub trait Notifier {
    fn info(&self, _message: &str) {}

    fn milestone(&self, _goal_name: &str, _milestone: Milestone) {}

    fn goal_completed(&self, _goal_name: &str) {}

    fn coins_earned(&self, _amount: i64, _reason: &str) {}

    fn insufficient_coins(&self, _needed: i64, _balance: i64) {}
}

/// Discards everything. Used by tests and non-interactive paths.
pub struct NullNotifier;

impl Notifier for NullNotifier {}

/// Prints to stdout in the same voice the rest of the CLI uses.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn milestone(&self, goal_name: &str, milestone: Milestone) {
        println!(
            "🎯 {}: {}% milestone reached!",
            goal_name,
            milestone.percent()
        );
    }

    fn goal_completed(&self, goal_name: &str) {
        println!("🎉 Goal completed: {}!", goal_name);
    }

    fn coins_earned(&self, amount: i64, reason: &str) {
        println!("🪙 +{} coins • {}", amount, reason);
    }

    fn insufficient_coins(&self, needed: i64, balance: i64) {
        println!(
            "🪙 Not enough coins: need {}, have {}.",
            needed, balance
        );
    }
}
