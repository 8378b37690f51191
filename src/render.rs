// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTML fragment rendering. Every function here is a pure map from data to
//! markup, so the same inputs always produce byte-identical output.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::feed::{DayGroup, Summary, group_by_day};
use crate::models::{BudgetSummary, Goal, Transaction, TransactionKind};
use crate::utils::{display_category_name, fmt_usd};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_transaction_list(transactions: &[&Transaction], today: NaiveDate) -> String {
    if transactions.is_empty() {
        return render_empty_state();
    }
    let groups = group_by_day(transactions, today);
    let mut html = String::new();
    for group in &groups {
        html.push_str(&render_day_group(group));
    }
    html
}

fn render_day_group(group: &DayGroup) -> String {
    let mut items = String::new();
    for tx in &group.transactions {
        items.push_str(&render_transaction_item(tx));
    }
    format!(
        "<div class=\"transaction-date-group\">\
         <div class=\"date-header\">{}</div>{}</div>",
        escape_html(&group.header),
        items
    )
}

pub fn render_transaction_item(tx: &Transaction) -> String {
    let (icon_bg, sign, amount_class) = match tx.kind {
        TransactionKind::Income => ("#d1fae5", "+", "income"),
        TransactionKind::Expense => ("#fee2e2", "-", "expense"),
    };
    let meta = format!(
        "{} • {}",
        display_category_name(&tx.category),
        tx.occurred_at.format("%b %-d, %Y")
    );
    format!(
        "<div class=\"transaction-item\" data-id=\"{}\">\
         <div class=\"transaction-icon\" style=\"background:{}\">{}</div>\
         <div class=\"transaction-info\">\
         <div class=\"transaction-title\">{}</div>\
         <div class=\"transaction-meta\">{}</div>\
         </div>\
         <div class=\"transaction-amount {}\">{}{}</div>\
         </div>",
        escape_html(&tx.id),
        icon_bg,
        tx.icon,
        escape_html(&tx.description),
        escape_html(&meta),
        amount_class,
        sign,
        fmt_usd(&tx.amount)
    )
}

pub fn render_empty_state() -> String {
    "<div class=\"empty-state\">\
     <div class=\"empty-state-icon\">📭</div>\
     <p>No transactions yet</p>\
     <p class=\"empty-state-hint\">Add your first income or expense to get started.</p>\
     </div>"
        .to_string()
}

/// Shown in place of the list when a refresh fails; the button re-issues the
/// fetch.
pub fn render_fetch_error(message: &str) -> String {
    format!(
        "<div class=\"fetch-error\">\
         <p>Could not load transactions: {}</p>\
         <button class=\"retry-button\" data-action=\"retry-fetch\">Retry</button>\
         </div>",
        escape_html(message)
    )
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "<div class=\"feed-summary\">\
         <div class=\"summary-stat income\"><span>Income</span><strong>{}</strong></div>\
         <div class=\"summary-stat expense\"><span>Expenses</span><strong>{}</strong></div>\
         <div class=\"summary-stat net\"><span>Net</span><strong>{}</strong></div>\
         </div>",
        fmt_usd(&summary.income),
        fmt_usd(&summary.expenses),
        fmt_usd(&summary.net)
    )
}

pub fn render_budget_card(summary: &BudgetSummary) -> String {
    let pct = summary.percentage();
    let width = pct.min(100);
    let band = summary.band();
    let mut status = format!(
        "{}% used • {} remaining",
        pct,
        fmt_usd(&summary.remaining_amount())
    );
    if let Some(copy) = band.warning_copy() {
        status.push_str(" • ");
        status.push_str(copy);
    }
    let class = match band.css_class() {
        "" => "progress-fill".to_string(),
        c => format!("progress-fill {}", c),
    };
    format!(
        "<div class=\"budget-card\" data-category-id=\"{}\">\
         <div class=\"budget-card-header\">\
         <span class=\"budget-name\">{}</span>\
         <span class=\"budget-amounts\">{} / {}</span>\
         </div>\
         <div class=\"progress-bar\"><div class=\"{}\" style=\"width:{}%\"></div></div>\
         <div class=\"budget-status\">{}</div>\
         </div>",
        summary.category_id,
        escape_html(summary.display_name()),
        fmt_usd(&summary.spent),
        fmt_usd(&summary.budget),
        class,
        width,
        escape_html(&status)
    )
}

pub fn render_goal_card(goal: &Goal) -> String {
    let pct = goal.percentage();
    let width = pct.min(100.0);
    let badge = if goal.is_achieved() {
        "<span class=\"goal-badge\">✅ COMPLETED</span>"
    } else {
        ""
    };
    format!(
        "<div class=\"goal-card\" data-goal-id=\"{}\">\
         <div class=\"goal-card-header\">\
         <span class=\"goal-name\">{}</span>{}\
         </div>\
         <div class=\"goal-amounts\">{} of {}</div>\
         <div class=\"progress-bar\"><div class=\"progress-fill\" style=\"width:{:.1}%\"></div></div>\
         <div class=\"goal-status\">{:.1}% • due {}</div>\
         </div>",
        goal.id,
        escape_html(&goal.name),
        badge,
        fmt_usd(&goal.current_amount),
        fmt_usd(&goal.target_amount),
        width,
        pct,
        goal.due_date.format("%b %-d, %Y")
    )
}

/// Dashboard alert strip: one line per budget at or past its warning band.
pub fn render_budget_alerts(budgets: &[BudgetSummary]) -> String {
    let mut html = String::new();
    for b in budgets {
        let pct = b.percentage();
        let level = if pct >= 100 {
            "danger"
        } else if pct >= 80 {
            "warning"
        } else {
            continue;
        };
        html.push_str(&format!(
            "<div class=\"budget-alert {}\">{}: {}% of {} used</div>",
            level,
            escape_html(b.display_name()),
            pct,
            fmt_usd(&b.budget)
        ));
    }
    html
}

pub fn render_recent_transactions(recent: &[crate::models::RecentTransaction]) -> String {
    if recent.is_empty() {
        return String::new();
    }
    let mut items = String::new();
    for t in recent {
        let sign = match t.kind.as_deref() {
            Some("income") => "+",
            _ => "-",
        };
        items.push_str(&format!(
            "<div class=\"recent-item\">\
             <span class=\"recent-icon\">{}</span>\
             <span class=\"recent-title\">{}</span>\
             <span class=\"recent-amount\">{}{}</span>\
             </div>",
            t.category_icon.as_deref().unwrap_or("💸"),
            escape_html(t.description.as_deref().unwrap_or("Transaction")),
            sign,
            fmt_usd(&t.amount)
        ));
    }
    format!("<div class=\"recent-transactions\">{}</div>", items)
}

pub fn render_aggregate_tile(label: &str, value: &Decimal) -> String {
    format!(
        "<div class=\"stat-tile\"><span class=\"stat-label\">{}</span>\
         <span class=\"stat-value\">{}</span></div>",
        escape_html(label),
        fmt_usd(value)
    )
}
