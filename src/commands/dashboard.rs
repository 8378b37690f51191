// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::context::Context;
use crate::utils::{fmt_usd, maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("render", _)) => render(ctx)?,
        Some(("trend", sub)) => trend(ctx, sub)?,
        _ => show_default(ctx)?,
    }
    Ok(())
}

fn show_default(ctx: &Context) -> Result<()> {
    print_overview(ctx, false, false)
}

fn show(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    print_overview(ctx, sub.get_flag("json"), sub.get_flag("jsonl"))
}

fn print_overview(ctx: &Context, json: bool, jsonl: bool) -> Result<()> {
    let data = ctx.api.dashboard()?;
    if !data.data_available {
        println!(
            "{}",
            data.message
                .as_deref()
                .unwrap_or("No dashboard data yet. Add a transaction to get started.")
        );
        return Ok(());
    }
    if json || jsonl {
        // The overview is assembled server side; re-fetch as raw JSON so the
        // flags print exactly what came over the wire.
        let raw = ctx.api.financial_aggregates()?;
        maybe_print_json(json, jsonl, &raw)?;
        return Ok(());
    }

    if let Some(agg) = &data.financial_aggregates {
        println!(
            "{}",
            pretty_table(
                &["Balance", "Monthly income", "Monthly expenses", "Savings"],
                vec![vec![
                    fmt_usd(&agg.current_balance),
                    fmt_usd(&agg.monthly_income),
                    fmt_usd(&agg.monthly_expenses),
                    fmt_usd(&agg.total_savings),
                ]],
            )
        );
        if let Some(rate) = agg.savings_rate {
            println!("Savings rate: {:.1}%", rate);
        }
    }

    if !data.budgets.is_empty() {
        let rows = data
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.display_name().to_string(),
                    fmt_usd(&b.spent),
                    fmt_usd(&b.budget),
                    format!("{}%", b.percentage()),
                    b.band().warning_copy().unwrap_or("").to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Spent", "Limit", "Used", "Status"], rows)
        );
    }

    if !data.savings_goals.is_empty() {
        let rows = data
            .savings_goals
            .iter()
            .map(|g| {
                vec![
                    g.name.clone(),
                    fmt_usd(&g.current_amount),
                    fmt_usd(&g.target_amount),
                    format!("{:.1}%", g.percentage()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Saved", "Target", "Progress"], rows)
        );
    }

    if !data.recent_transactions.is_empty() {
        let rows = data
            .recent_transactions
            .iter()
            .map(|t| {
                vec![
                    t.occurred_at.clone().unwrap_or_default(),
                    t.description.clone().unwrap_or_default(),
                    t.category_name.clone().unwrap_or_default(),
                    t.kind.clone().unwrap_or_default(),
                    fmt_usd(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}

fn render(ctx: &Context) -> Result<()> {
    let data = ctx.api.dashboard()?;
    if !data.data_available {
        println!("<div class=\"empty-state\"><p>No dashboard data yet.</p></div>");
        return Ok(());
    }
    if let Some(agg) = &data.financial_aggregates {
        println!("{}", crate::render::render_aggregate_tile("Balance", &agg.current_balance));
        println!("{}", crate::render::render_aggregate_tile("Income", &agg.monthly_income));
        println!("{}", crate::render::render_aggregate_tile("Expenses", &agg.monthly_expenses));
        println!("{}", crate::render::render_aggregate_tile("Savings", &agg.total_savings));
    }
    let alerts = crate::render::render_budget_alerts(&data.budgets);
    if !alerts.is_empty() {
        println!("{}", alerts);
    }
    let recent = crate::render::render_recent_transactions(&data.recent_transactions);
    if !recent.is_empty() {
        println!("{}", recent);
    }
    for b in &data.budgets {
        println!("{}", crate::render::render_budget_card(b));
    }
    for g in &data.savings_goals {
        println!("{}", crate::render::render_goal_card(g));
    }
    Ok(())
}

fn trend(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let period = match sub.get_one::<String>("period").unwrap().to_lowercase().as_str() {
        "week" => "WEEK",
        "month" => "MONTH",
        "year" => "YEAR",
        other => return Err(anyhow!("Unknown period '{}', expected week, month or year", other)),
    };
    let trend = ctx.api.spending_trend(period)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trend)? {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&trend)?);
    Ok(())
}
