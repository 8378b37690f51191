// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use log::warn;

use crate::context::Context;
use crate::models::SetBudgetRequest;
use crate::render::render_budget_card;
use crate::utils::{fmt_usd, maybe_print_json, pretty_table, validate_budget_input};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ctx, sub)?,
        Some(("summary", sub)) => summary(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("delete", sub)) => delete(ctx, sub)?,
        Some(("render", sub)) => render(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// Accepts a numeric id or a category name.
fn resolve_category(ctx: &Context, raw: &str) -> Result<i64> {
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    ctx.category_id_by_name(raw)?
        .ok_or_else(|| anyhow!("Unknown category '{}'", raw))
}

fn set(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let category_raw = sub.get_one::<String>("category").unwrap();
    let category_id = resolve_category(ctx, category_raw).ok();
    let amount_raw = sub.get_one::<String>("amount").unwrap();

    let amount = validate_budget_input(category_id, amount_raw)
        .map_err(|errors| anyhow!(errors.join("; ")))?;
    let category_id = category_id.ok_or_else(|| anyhow!("Unknown category '{}'", category_raw))?;

    let req = SetBudgetRequest {
        category_id,
        amount,
        custom_name: sub.get_one::<String>("name").cloned(),
    };
    ctx.api.set_budget(&req)?;
    println!("Budget for category {} set to {}", category_id, fmt_usd(&amount));
    Ok(())
}

fn summary_rows(summaries: &[crate::models::BudgetSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .map(|s| {
            vec![
                s.display_name().to_string(),
                fmt_usd(&s.spent),
                fmt_usd(&s.budget),
                format!("{}%", s.percentage()),
                s.band().warning_copy().unwrap_or("").to_string(),
            ]
        })
        .collect()
}

fn summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let category_id = resolve_category(ctx, sub.get_one::<String>("category").unwrap())?;
    let s = ctx.api.budget_summary(category_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Category", "Spent", "Budget", "Used", "Status"],
            summary_rows(std::slice::from_ref(&s)),
        )
    );
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let categories = ctx.api.budget_categories()?;
    let mut summaries = Vec::with_capacity(categories.len());
    for cat in &categories {
        // One bad category should not hide the rest.
        match ctx.api.budget_summary(cat.category_id) {
            Ok(s) => summaries.push(s),
            Err(e) => warn!("summary for category {} failed: {}", cat.category_id, e),
        }
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summaries)? {
        return Ok(());
    }
    if summaries.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Category", "Spent", "Budget", "Used", "Status"],
            summary_rows(&summaries),
        )
    );
    Ok(())
}

fn delete(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let category_id = resolve_category(ctx, sub.get_one::<String>("category").unwrap())?;
    ctx.api.delete_budget(category_id)?;
    println!("Budget for category {} removed", category_id);
    Ok(())
}

fn render(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let category_id = resolve_category(ctx, sub.get_one::<String>("category").unwrap())?;
    let s = ctx.api.budget_summary(category_id)?;
    println!("{}", render_budget_card(&s));
    Ok(())
}
