// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// One income or expense record as the feed displays it. Assembled from the
/// wire records, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub icon: &'static str,
    pub occurred_at: NaiveDateTime,
}

/// Wire shape shared by /api/income and /api/expenses rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowRecord {
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub updated_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCashflow {
    pub amount: Decimal,
    pub description: String,
    pub occurred_at: String,
    pub account_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, alias = "isSystem")]
    pub system: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMergeRequest {
    pub source_ids: Vec<i64>,
    pub target_id: i64,
}

/// Spend-vs-budget summary for one category, as returned by
/// /api/budget/summary/{categoryId}.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub category_id: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
    pub budget: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub remaining: Option<Decimal>,
    #[serde(default)]
    pub custom_name: Option<String>,
}

impl BudgetSummary {
    pub fn percentage(&self) -> u32 {
        budget_percentage(self.spent, self.budget)
    }

    pub fn band(&self) -> BudgetBand {
        BudgetBand::for_percentage(self.percentage())
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.remaining.unwrap_or(self.budget - self.spent)
    }

    pub fn display_name(&self) -> &str {
        self.custom_name
            .as_deref()
            .or(self.category_name.as_deref())
            .unwrap_or("Budget")
    }
}

/// `round(spent / budget * 100)` with a zero budget pinned to 0. Rounds half
/// away from zero, matching ordinary arithmetic rounding.
pub fn budget_percentage(spent: Decimal, budget: Decimal) -> u32 {
    if budget <= Decimal::ZERO {
        return 0;
    }
    let pct = spent / budget * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Utilization band driving the progress-bar class and warning copy.
/// Simple thresholds, no hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetBand {
    Over,
    NearLimit,
    High,
    Normal,
}

impl BudgetBand {
    pub fn for_percentage(pct: u32) -> Self {
        if pct >= 100 {
            BudgetBand::Over
        } else if pct >= 90 {
            BudgetBand::NearLimit
        } else if pct >= 80 {
            BudgetBand::High
        } else {
            BudgetBand::Normal
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BudgetBand::Over | BudgetBand::NearLimit => "danger",
            BudgetBand::High => "warning",
            BudgetBand::Normal => "",
        }
    }

    pub fn warning_copy(&self) -> Option<&'static str> {
        match self {
            BudgetBand::Over => Some("🔥 Over budget!"),
            BudgetBand::NearLimit => Some("🔥 Over limit risk"),
            BudgetBand::High => Some("⚠️ High usage"),
            BudgetBand::Normal => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBudgetRequest {
    pub category_id: i64,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "ACTIVE", alias = "active", alias = "Active")]
    Active,
    #[serde(rename = "ACHIEVED", alias = "achieved", alias = "Achieved")]
    Achieved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
}

impl Goal {
    pub fn percentage(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 0.0;
        }
        (self.current_amount / self.target_amount * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_achieved(&self) -> bool {
        self.status == GoalStatus::Achieved || self.current_amount >= self.target_amount
    }
}

/// Progress milestones a single contribution can cross. At most one fires per
/// contribution: completion wins, otherwise the highest newly crossed tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    Quarter,
    Half,
    ThreeQuarters,
    Completed,
}

impl Milestone {
    pub fn crossed(old_pct: f64, new_pct: f64) -> Option<Milestone> {
        if new_pct >= 100.0 {
            Some(Milestone::Completed)
        } else if new_pct >= 75.0 && old_pct < 75.0 {
            Some(Milestone::ThreeQuarters)
        } else if new_pct >= 50.0 && old_pct < 50.0 {
            Some(Milestone::Half)
        } else if new_pct >= 25.0 && old_pct < 25.0 {
            Some(Milestone::Quarter)
        } else {
            None
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            Milestone::Quarter => 25,
            Milestone::Half => 50,
            Milestone::ThreeQuarters => 75,
            Milestone::Completed => 100,
        }
    }

    pub fn coin_reward(&self) -> i64 {
        match self {
            Milestone::Quarter => 25,
            Milestone::Half => 50,
            Milestone::ThreeQuarters => 75,
            Milestone::Completed => 150,
        }
    }

    pub fn grant_label(&self) -> &'static str {
        match self {
            Milestone::Quarter => "25% milestone reached",
            Milestone::Half => "50% milestone reached",
            Milestone::ThreeQuarters => "75% milestone reached",
            Milestone::Completed => "Savings milestone reached",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub name: String,
    pub target_amount: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRequest {
    pub from_account_id: i64,
    pub goal_id: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_goal_balance: Option<Decimal>,
    #[serde(default)]
    pub new_cash_balance: Option<Decimal>,
}

/// Recurring billing cadence. Unknown wire values fall back to monthly,
/// matching the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "WEEKLY" => Some(Frequency::Weekly),
            "FORTNIGHTLY" => Some(Frequency::Fortnightly),
            "MONTHLY" => Some(Frequency::Monthly),
            "QUARTERLY" => Some(Frequency::Quarterly),
            "YEARLY" | "ANNUAL" | "ANNUALLY" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
            Frequency::Fortnightly => "FORTNIGHTLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    pub fn per_label(&self) -> &'static str {
        match self {
            Frequency::Weekly => "/week",
            Frequency::Fortnightly => "/fortnight",
            Frequency::Monthly => "/month",
            Frequency::Quarterly => "/quarter",
            Frequency::Yearly => "/year",
        }
    }

    /// Cost per month for one billing of `amount`, 2dp half-up.
    pub fn monthly_equivalent(&self, amount: Decimal) -> Decimal {
        let monthly = match self {
            Frequency::Weekly => amount * Decimal::new(52, 0) / Decimal::new(12, 0),
            Frequency::Fortnightly => amount * Decimal::new(26, 0) / Decimal::new(12, 0),
            Frequency::Monthly => amount,
            Frequency::Quarterly => amount / Decimal::new(3, 0),
            Frequency::Yearly => amount / Decimal::new(12, 0),
        };
        monthly.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_id: i64,
    pub merchant: String,
    pub amount: Decimal,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub next_post_at: Option<String>,
    #[serde(default)]
    pub monthly_equivalent: Option<Decimal>,
}

impl Subscription {
    pub fn frequency(&self) -> Frequency {
        self.frequency
            .as_deref()
            .and_then(Frequency::parse)
            .unwrap_or(Frequency::Monthly)
    }

    /// Server-computed monthly equivalent, recomputed locally when absent.
    pub fn monthly_cost(&self) -> Decimal {
        self.monthly_equivalent
            .unwrap_or_else(|| self.frequency().monthly_equivalent(self.amount))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub merchant: String,
    pub amount: Decimal,
    pub frequency: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_post_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Rollup over the subscription list, mirroring the summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionSummary {
    pub monthly_total: Decimal,
    pub active_count: usize,
    pub due_this_week: usize,
}

impl SubscriptionSummary {
    /// Active subscriptions only; due-this-week counts a nextPostAt within
    /// [today, today+7] inclusive.
    pub fn compute(subs: &[Subscription], today: NaiveDate) -> Self {
        let mut monthly_total = Decimal::ZERO;
        let mut active_count = 0;
        let mut due_this_week = 0;
        for s in subs {
            if !s.is_active {
                continue;
            }
            active_count += 1;
            monthly_total += s.monthly_cost();
            let next = s
                .next_post_at
                .as_deref()
                .and_then(|raw| crate::utils::parse_datetime(raw).ok())
                .map(|dt| dt.date());
            if let Some(date) = next {
                let delta = date - today;
                if delta >= chrono::Duration::zero() && delta <= chrono::Duration::days(7) {
                    due_this_week += 1;
                }
            }
        }
        Self {
            monthly_total,
            active_count,
            due_this_week,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub account_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinBalance {
    #[serde(default)]
    pub balance: Decimal,
}

impl CoinBalance {
    pub fn as_coins(&self) -> i64 {
        self.balance.to_i64().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub amount: i64,
    pub source_type: String,
    pub reward_event_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResponse {
    #[serde(default)]
    pub balance_after: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub item_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemResponse {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub balance_after: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardItem {
    pub item_id: i64,
    pub item_name: String,
    pub price: i64,
    #[serde(default)]
    pub stock_qty: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinEvent {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default = "default_true")]
    pub data_available: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub financial_aggregates: Option<FinancialAggregates>,
    #[serde(default)]
    pub budgets: Vec<BudgetSummary>,
    #[serde(default)]
    pub recent_transactions: Vec<RecentTransaction>,
    #[serde(default)]
    pub savings_goals: Vec<Goal>,
    #[serde(default)]
    pub spending_trend: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAggregates {
    #[serde(default)]
    pub monthly_income: Decimal,
    #[serde(default)]
    pub monthly_expenses: Decimal,
    #[serde(default)]
    pub current_balance: Decimal,
    #[serde(default)]
    pub total_savings: Decimal,
    #[serde(default)]
    pub income_change_percent: Option<f64>,
    #[serde(default)]
    pub expense_change_percent: Option<f64>,
    #[serde(default)]
    pub savings_rate: Option<f64>,
    #[serde(default)]
    pub goals_progress_percent: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    #[serde(default)]
    pub cash_flow_id: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_icon: Option<String>,
}
