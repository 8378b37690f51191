// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;

use oversave::coins::{GrantKind, Wallet, client_event_id, grant_for, milestone_grant};
use oversave::commands::coins::notify_redeemed;
use oversave::models::Milestone;
use oversave::notify::{Notifier, NullNotifier};

#[derive(Default)]
struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

#[test]
fn grant_amounts_are_fixed_per_kind() {
    assert_eq!(GrantKind::TransactionLogged.amount(), 25);
    assert_eq!(GrantKind::BudgetGoal.amount(), 100);
    assert_eq!(GrantKind::SavingsMilestone.amount(), 150);
    assert_eq!(GrantKind::DailyStreak.amount(), 50);
    assert_eq!(GrantKind::WeeklyStreak.amount(), 200);
    assert_eq!(GrantKind::Challenge.amount(), 300);
}

#[test]
fn grant_requests_carry_kind_and_event_id() {
    let req = grant_for(GrantKind::TransactionLogged);
    assert_eq!(req.amount, 25);
    assert_eq!(req.source_type, "TRANSACTION");
    assert!(req.reward_event_id.starts_with("client-"));
}

#[test]
fn event_ids_embed_time_and_process() {
    let id = client_event_id();
    let parts: Vec<&str> = id.splitn(3, '-').collect();
    assert_eq!(parts[0], "client");
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2], std::process::id().to_string());
}

#[test]
fn event_ids_differ_across_calls() {
    let a = client_event_id();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = client_event_id();
    assert_ne!(a, b);
}

#[test]
fn milestone_grants_use_the_tier_amount() {
    let quarter = milestone_grant(Milestone::Quarter);
    assert_eq!(quarter.amount, 25);
    assert_eq!(quarter.source_type, "SAVINGS_MILESTONE");
    let done = milestone_grant(Milestone::Completed);
    assert_eq!(done.amount, 150);
}

#[test]
fn null_notifier_swallows_every_hook() {
    let n = NullNotifier;
    n.info("ignored");
    n.milestone("Trip", Milestone::Half);
    n.goal_completed("Trip");
    n.coins_earned(25, "Transaction logged");
    n.insufficient_coins(150, 100);
}

#[test]
fn redeem_confirmation_reaches_the_notifier() {
    let n = RecordingNotifier::default();
    notify_redeemed(&n, "Coffee voucher", Some(88));
    notify_redeemed(&n, "Sticker pack", None);
    assert_eq!(
        *n.messages.borrow(),
        vec![
            "Redeemed Coffee voucher (order 88)".to_string(),
            "Redeemed Sticker pack".to_string(),
        ]
    );
}

#[test]
fn wallet_pre_check_is_inclusive() {
    let wallet = Wallet::new(100);
    assert!(wallet.can_afford(100));
    assert!(wallet.can_afford(99));
    assert!(!wallet.can_afford(101));
    assert!(!Wallet::new(0).can_afford(1));
}
