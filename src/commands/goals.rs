// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use log::warn;
use rust_decimal::Decimal;

use crate::coins::milestone_grant;
use crate::context::Context;
use crate::models::{ContributionRequest, CreateGoalRequest, Goal, Milestone};
use crate::notify::Notifier;
use crate::render::render_goal_card;
use crate::utils::{
    fmt_usd, maybe_print_json, parse_date, parse_decimal, pretty_table, validate_goal_input,
};

pub fn handle(ctx: &Context, notifier: &dyn Notifier, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("contributions", sub)) => contributions(ctx, sub)?,
        Some(("contribute", sub)) => contribute(ctx, notifier, sub)?,
        Some(("render", sub)) => render(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| anyhow!("Invalid goal id '{}'", raw))
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let goals = ctx.api.goals()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                g.name.clone(),
                fmt_usd(&g.current_amount),
                fmt_usd(&g.target_amount),
                format!("{:.1}%", g.percentage()),
                g.due_date.to_string(),
                if g.is_achieved() { "✅" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Saved", "Target", "Progress", "Due", ""], rows)
    );
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let target_amount = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let due_date = parse_date(sub.get_one::<String>("due").unwrap())?;

    let today = Local::now().date_naive();
    let errors = validate_goal_input(&name, target_amount, Some(due_date), today);
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; ")));
    }

    let created = ctx.api.create_goal(&CreateGoalRequest {
        name,
        target_amount,
        due_date,
    })?;
    println!(
        "Created goal {} ({}), target {}",
        created.name,
        created.id,
        fmt_usd(&created.target_amount)
    );
    Ok(())
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    ctx.api.delete_goal(id)?;
    println!("Deleted goal {}", id);
    Ok(())
}

fn update(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let mut patch = serde_json::Map::new();
    if let Some(name) = sub.get_one::<String>("name") {
        patch.insert("name".to_string(), serde_json::json!(name.trim()));
    }
    if let Some(raw) = sub.get_one::<String>("target") {
        let target = parse_decimal(raw)?;
        if target <= Decimal::ZERO {
            return Err(anyhow!("Target amount must be greater than 0"));
        }
        patch.insert("targetAmount".to_string(), serde_json::json!(target));
    }
    if let Some(raw) = sub.get_one::<String>("due") {
        let due = parse_date(raw)?;
        patch.insert("dueDate".to_string(), serde_json::json!(due));
    }
    if patch.is_empty() {
        return Err(anyhow!("Nothing to update; pass --name, --target or --due"));
    }
    let updated = ctx.api.update_goal(id, &serde_json::Value::Object(patch))?;
    println!("Updated goal {} ({})", updated.name, updated.id);
    Ok(())
}

fn contributions(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let from = sub.get_one::<String>("from").map(String::as_str);
    let to = sub.get_one::<String>("to").map(String::as_str);
    let entries = ctx.api.contributions(id, from, to)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        return Ok(());
    }
    if entries.is_empty() {
        println!("No contributions yet.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn contribute(ctx: &Context, notifier: &dyn Notifier, sub: &clap::ArgMatches) -> Result<()> {
    let goal_id = parse_id(sub.get_one::<String>("goal").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than 0"));
    }
    let from_account_id = match sub.get_one::<String>("account-id") {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid account id '{}'", raw))?,
        None => ctx
            .default_account(false)?
            .ok_or_else(|| anyhow!("No accounts on the server; pass --account-id"))?
            .id,
    };

    // Refuse locally when the funding account clearly cannot cover it.
    if let Some(account) = ctx
        .api
        .accounts()?
        .into_iter()
        .find(|a| a.id == from_account_id)
    {
        if account.balance < amount {
            return Err(anyhow!(
                "Insufficient funds: account {} holds {}",
                account.name,
                fmt_usd(&account.balance)
            ));
        }
    }

    let before = ctx.api.goal(goal_id)?;
    let old_pct = before.percentage();

    let resp = ctx.api.contribute(&ContributionRequest {
        from_account_id,
        goal_id,
        amount,
    })?;

    // Prefer the balance the server echoed back over a second fetch.
    let new_amount = resp
        .new_goal_balance
        .unwrap_or(before.current_amount + amount);
    let after = Goal {
        current_amount: new_amount,
        ..before.clone()
    };
    let new_pct = after.percentage();

    println!(
        "Contributed {} to {} ({:.1}% of {})",
        fmt_usd(&amount),
        after.name,
        new_pct.min(100.0),
        fmt_usd(&after.target_amount)
    );
    if let Some(balance) = resp.new_cash_balance {
        println!("Cash balance: {}", fmt_usd(&balance));
    }

    if let Some(milestone) = Milestone::crossed(old_pct, new_pct) {
        if milestone == Milestone::Completed {
            notifier.goal_completed(&after.name);
        } else {
            notifier.milestone(&after.name, milestone);
        }
        // Milestone grants are best effort; the contribution already landed.
        let grant = milestone_grant(milestone);
        match ctx.api.grant_coins(&grant) {
            Ok(_) => notifier.coins_earned(grant.amount, milestone.grant_label()),
            Err(e) => warn!("milestone grant failed: {}", e),
        }
    }
    Ok(())
}

fn render(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let goals = ctx.api.goals()?;
    match sub.get_one::<String>("id") {
        Some(raw) => {
            let id = parse_id(raw)?;
            let goal = goals
                .iter()
                .find(|g| g.id == id)
                .ok_or_else(|| anyhow!("No goal with id {}", id))?;
            println!("{}", render_goal_card(goal));
        }
        None => {
            for goal in &goals {
                println!("{}", render_goal_card(goal));
            }
        }
    }
    Ok(())
}
