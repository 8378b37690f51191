// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Coin reward bookkeeping. Grant amounts and labels are fixed per kind; the
//! server balance is authoritative and the local number is only a fast-fail
//! convenience before a redeem round trip.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{GrantRequest, Milestone};

/// Reward sources and their fixed grant amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantKind {
    TransactionLogged,
    BudgetGoal,
    SavingsMilestone,
    DailyStreak,
    WeeklyStreak,
    Challenge,
}

impl GrantKind {
    pub fn amount(&self) -> i64 {
        match self {
            GrantKind::TransactionLogged => 25,
            GrantKind::BudgetGoal => 100,
            GrantKind::SavingsMilestone => 150,
            GrantKind::DailyStreak => 50,
            GrantKind::WeeklyStreak => 200,
            GrantKind::Challenge => 300,
        }
    }

    pub fn source_type(&self) -> &'static str {
        match self {
            GrantKind::TransactionLogged => "TRANSACTION",
            GrantKind::BudgetGoal => "BUDGET_GOAL",
            GrantKind::SavingsMilestone => "SAVINGS_MILESTONE",
            GrantKind::DailyStreak => "DAILY_STREAK",
            GrantKind::WeeklyStreak => "WEEKLY_STREAK",
            GrantKind::Challenge => "CHALLENGE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrantKind::TransactionLogged => "Transaction logged",
            GrantKind::BudgetGoal => "Budget goal achieved",
            GrantKind::SavingsMilestone => "Savings milestone reached",
            GrantKind::DailyStreak => "Daily streak bonus",
            GrantKind::WeeklyStreak => "Weekly streak bonus",
            GrantKind::Challenge => "Challenge completed",
        }
    }
}

/// Milestone grants reuse the savings source type but carry the tier amount.
pub fn milestone_grant(milestone: Milestone) -> GrantRequest {
    GrantRequest {
        amount: milestone.coin_reward(),
        source_type: GrantKind::SavingsMilestone.source_type().to_string(),
        reward_event_id: client_event_id(),
    }
}

pub fn grant_for(kind: GrantKind) -> GrantRequest {
    GrantRequest {
        amount: kind.amount(),
        source_type: kind.source_type().to_string(),
        reward_event_id: client_event_id(),
    }
}

/// Client-generated idempotency key; the server dedupes repeats of the same
/// id.
pub fn client_event_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("client-{}-{}", millis, std::process::id())
}

/// Locally known balance used only for the pre-check before a redeem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wallet {
    pub balance: i64,
}

impl Wallet {
    pub fn new(balance: i64) -> Self {
        Self { balance }
    }

    pub fn can_afford(&self, price: i64) -> bool {
        self.balance >= price
    }
}
