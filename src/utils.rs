// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

/// Ceiling for a monthly budget amount, inclusive.
pub static MAX_BUDGET_AMOUNT: Lazy<Decimal> = Lazy::new(|| Decimal::new(99_999_999, 2));

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

// Trailing "Z" or "+hh:mm"/"-hhmm" offset; the backend mixes both.
static TZ_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([zZ]|[+\-]\d{2}:?\d{2})$").unwrap()
});

/// Parse a backend or CSV timestamp into a naive local datetime.
///
/// Accepts "YYYY-MM-DD HH:MM[:SS]" with a space or "T" separator, optional
/// fractional seconds, an optional trailing zone suffix (dropped), and a bare
/// date (midnight).
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Empty datetime"));
    }
    let mut s = trimmed.to_string();
    if s.contains(' ') && !s.contains('T') {
        s = s.replacen(' ', "T", 1);
    }
    let s = TZ_SUFFIX.replace(&s, "").into_owned();

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    Err(anyhow!("Invalid datetime '{}'", raw))
}

/// "$1,234.50" with the sign ahead of the dollar sign.
pub fn fmt_usd(d: &Decimal) -> String {
    let v = d.round_dp(2);
    let sign = if v.is_sign_negative() && !v.is_zero() { "-" } else { "" };
    let s = format!("{:.2}", v.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Map a lowercase category slug to its display name. Names that already look
/// like backend display names (spaces or a leading capital) pass through.
pub fn display_category_name(category: &str) -> String {
    if category.is_empty() {
        return "Uncategorized".to_string();
    }
    let first_upper = category
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false);
    if category.contains(' ') || first_upper {
        return category.to_string();
    }
    match category.to_lowercase().as_str() {
        "food" => "Food & Dining",
        "transport" | "transportation" => "Transportation",
        "shopping" => "Shopping",
        "entertainment" => "Entertainment",
        "bills" => "Bills & Utilities",
        "utilities" => "Utilities",
        "income" => "Income",
        "education" => "Education",
        "health" => "Health",
        "fitness" => "Fitness",
        "rent" => "Rent",
        "housing" => "Housing",
        "groceries" => "Groceries",
        "other" => "Other",
        "uncategorized" => "Uncategorized",
        _ => category,
    }
    .to_string()
}

pub fn category_icon(category: &str) -> &'static str {
    match category.trim().to_lowercase().as_str() {
        "food" | "food & dining" => "🍔",
        "groceries" => "🛒",
        "transport" | "transportation" => "🚗",
        "shopping" => "🛍️",
        "entertainment" => "🎮",
        "education" => "📚",
        "health" => "🏥",
        "fitness" => "💪",
        "utilities" | "bills & utilities" => "💡",
        "bills" | "rent" | "housing" => "🏠",
        "income" => "💰",
        _ => "💸",
    }
}

/// Client-side budget validation. Runs before any network call; an error list
/// blocks submission.
pub fn validate_budget_input(
    category_id: Option<i64>,
    amount_raw: &str,
) -> std::result::Result<Decimal, Vec<String>> {
    let mut errors = Vec::new();
    if category_id.is_none() {
        errors.push("Please select a category".to_string());
    }
    let mut amount = None;
    if amount_raw.trim().is_empty() {
        errors.push("Amount is required".to_string());
    } else {
        match amount_raw.trim().parse::<Decimal>() {
            Err(_) => errors.push("Amount must be a valid number".to_string()),
            Ok(v) if v <= Decimal::ZERO => {
                errors.push("Amount must be greater than 0".to_string())
            }
            Ok(v) if v > *MAX_BUDGET_AMOUNT => {
                errors.push("Amount cannot exceed $999,999.99".to_string())
            }
            Ok(v) => amount = Some(v),
        }
    }
    match (errors.is_empty(), amount) {
        (true, Some(v)) => Ok(v),
        _ => Err(errors),
    }
}

/// Client-side goal validation; empty vec means valid.
pub fn validate_goal_input(
    name: &str,
    target_amount: Decimal,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Goal name is required".to_string());
    }
    if target_amount <= Decimal::ZERO {
        errors.push("Target amount must be greater than 0".to_string());
    }
    match due_date {
        None => errors.push("Due date is required".to_string()),
        Some(d) if d < today => errors.push("Due date must be in the future".to_string()),
        Some(_) => {}
    }
    errors
}

/// Client-side subscription validation; empty vec means valid.
pub fn validate_subscription_input(merchant: &str, amount: Decimal) -> Vec<String> {
    let mut errors = Vec::new();
    let trimmed = merchant.trim();
    if trimmed.is_empty() {
        errors.push("Service name is required".to_string());
    } else if trimmed.chars().count() > 60 {
        errors.push("Service name must be at most 60 characters".to_string());
    }
    if amount <= Decimal::ZERO {
        errors.push("Amount must be greater than 0".to_string());
    }
    errors
}

pub fn validate_category_name(name: &str) -> std::result::Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Category name is required".to_string());
    }
    if trimmed.chars().count() > 255 {
        return Err("Category name must be less than 255 characters".to_string());
    }
    Ok(())
}
