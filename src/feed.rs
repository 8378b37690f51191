// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction feed: merge the income and expense streams, filter them,
//! bucket by calendar day, and keep stale refreshes from clobbering newer
//! ones.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{CashflowRecord, Transaction, TransactionKind};
use crate::utils::{category_icon, display_category_name, parse_datetime};

/// Merged, newest-first feed of both streams.
#[derive(Debug, Clone, Default)]
pub struct TransactionFeed {
    pub transactions: Vec<Transaction>,
}

impl TransactionFeed {
    /// Build the feed from the two wire lists. Rows without a parseable
    /// timestamp keep their server order at the epoch end of the sort.
    pub fn from_records(income: Vec<CashflowRecord>, expenses: Vec<CashflowRecord>) -> Self {
        let mut transactions = Vec::with_capacity(income.len() + expenses.len());
        for (i, rec) in income.into_iter().enumerate() {
            transactions.push(to_transaction(rec, TransactionKind::Income, i));
        }
        for (i, rec) in expenses.into_iter().enumerate() {
            transactions.push(to_transaction(rec, TransactionKind::Expense, i));
        }
        transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Self { transactions }
    }

    pub fn filtered(&self, filters: &Filters, today: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filters.matches(tx, today))
            .collect()
    }

    /// Income, expense and net totals over the whole feed, ignoring filters.
    pub fn summary(&self) -> Summary {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for tx in &self.transactions {
            match tx.kind {
                TransactionKind::Income => income += tx.amount,
                TransactionKind::Expense => expenses += tx.amount,
            }
        }
        Summary {
            income,
            expenses,
            net: income - expenses,
            count: self.transactions.len(),
        }
    }
}

fn to_transaction(rec: CashflowRecord, kind: TransactionKind, index: usize) -> Transaction {
    let occurred_at = rec
        .occurred_at
        .as_deref()
        .or(rec.created_at.as_deref())
        .and_then(|raw| parse_datetime(raw).ok())
        .unwrap_or_default();
    let category = rec.category_name.clone().unwrap_or_else(|| {
        match kind {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Uncategorized",
        }
        .to_string()
    });
    let icon = match kind {
        TransactionKind::Income => "💰",
        TransactionKind::Expense => category_icon(&category),
    };
    Transaction {
        id: format!("{}-{}", kind.as_str(), index),
        description: rec
            .description
            .unwrap_or_else(|| "Transaction".to_string()),
        amount: rec.amount,
        kind,
        category,
        icon,
        occurred_at,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    /// Rolling seven days including today.
    Week,
    /// Current calendar month.
    Month,
    /// Current calendar year.
    Year,
}

impl DateFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(DateFilter::All),
            "today" => Some(DateFilter::Today),
            "week" => Some(DateFilter::Week),
            "month" => Some(DateFilter::Month),
            "year" => Some(DateFilter::Year),
            _ => None,
        }
    }

    fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Today => date == today,
            DateFilter::Week => date <= today && today - date < Duration::days(7),
            DateFilter::Month => date.year() == today.year() && date.month() == today.month(),
            DateFilter::Year => date.year() == today.year(),
        }
    }
}

/// Conjunctive filter set over the feed.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date: DateFilter,
}

impl Filters {
    pub fn matches(&self, tx: &Transaction, today: NaiveDate) -> bool {
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(cat) = &self.category {
            let want = display_category_name(cat);
            let have = display_category_name(&tx.category);
            if !have.eq_ignore_ascii_case(&want) {
                return false;
            }
        }
        if let Some(q) = &self.search {
            let q = q.trim().to_lowercase();
            if !q.is_empty() {
                let hit = tx.description.to_lowercase().contains(&q)
                    || tx.category.to_lowercase().contains(&q);
                if !hit {
                    return false;
                }
            }
        }
        self.date.matches(tx.occurred_at.date(), today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub count: usize,
}

/// Transactions sharing one calendar day, newest first inside the group.
#[derive(Debug)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub header: String,
    pub transactions: Vec<&'a Transaction>,
}

/// Bucket an already-sorted filtered view into day groups, newest day first.
pub fn group_by_day<'a>(transactions: &[&'a Transaction], today: NaiveDate) -> Vec<DayGroup<'a>> {
    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    for tx in transactions {
        let date = tx.occurred_at.date();
        match groups.last_mut() {
            Some(g) if g.date == date => g.transactions.push(tx),
            _ => groups.push(DayGroup {
                date,
                header: format_day_header(date, today),
                transactions: vec![tx],
            }),
        }
    }
    groups
}

/// "Today, Nov 1", "Yesterday, Nov 1", or "Nov 1, 2024" for older days.
pub fn format_day_header(date: NaiveDate, today: NaiveDate) -> String {
    let month_day = format!("{} {}", date.format("%b"), date.day());
    if date == today {
        format!("Today, {}", month_day)
    } else if today - date == Duration::days(1) {
        format!("Yesterday, {}", month_day)
    } else {
        format!("{}, {}", month_day, date.year())
    }
}

/// Monotonic sequence guard for feed refreshes. A slow response commits only
/// if nothing newer was issued after it.
#[derive(Debug, Default)]
pub struct FetchSeq {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl FetchSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a refresh about to start.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True if this ticket is still the newest issued; marks it applied.
    /// A stale ticket is dropped without touching the applied mark.
    pub fn try_commit(&self, ticket: u64) -> bool {
        if ticket != self.issued.load(Ordering::SeqCst) {
            return false;
        }
        self.applied.store(ticket, Ordering::SeqCst);
        true
    }

    pub fn last_applied(&self) -> u64 {
        self.applied.load(Ordering::SeqCst)
    }
}
