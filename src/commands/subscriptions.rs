// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;

use crate::context::Context;
use crate::models::{Frequency, Subscription, SubscriptionRequest, SubscriptionSummary};
use crate::utils::{
    fmt_usd, maybe_print_json, parse_datetime, parse_decimal, pretty_table,
    validate_subscription_input,
};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("update", sub)) => update(ctx, sub)?,
        Some(("pause", sub)) => pause(ctx, sub)?,
        Some(("resume", sub)) => resume(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("summary", sub)) => summary(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| anyhow!("Invalid subscription id '{}'", raw))
}

fn parse_frequency(raw: &str) -> Result<Frequency> {
    Frequency::parse(raw).ok_or_else(|| {
        anyhow!(
            "Unknown frequency '{}', expected weekly, fortnightly, monthly, quarterly or yearly",
            raw
        )
    })
}

fn wire_datetime(raw: &str) -> Result<String> {
    Ok(parse_datetime(raw)?.format("%Y-%m-%dT%H:%M:%S").to_string())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let subs = ctx.api.subscriptions(sub.get_flag("active"))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &subs)? {
        return Ok(());
    }
    let rows = subs
        .iter()
        .map(|s| {
            vec![
                s.subscription_id.to_string(),
                s.merchant.clone(),
                format!("{}{}", fmt_usd(&s.amount), s.frequency().per_label()),
                fmt_usd(&s.monthly_cost()),
                s.next_post_at.clone().unwrap_or_default(),
                if s.is_active { "active" } else { "paused" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Service", "Billing", "Per month", "Next charge", "Status"],
            rows,
        )
    );
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let merchant = sub.get_one::<String>("merchant").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let errors = validate_subscription_input(&merchant, amount);
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; ")));
    }
    let frequency = parse_frequency(sub.get_one::<String>("frequency").unwrap())?;
    let start = wire_datetime(sub.get_one::<String>("start").unwrap())?;

    let created = ctx.api.create_subscription(&SubscriptionRequest {
        merchant,
        amount,
        frequency: frequency.as_str().to_string(),
        start_date: start.clone(),
        first_post_at: Some(start),
        is_active: Some(true),
    })?;
    println!(
        "Added {} ({}) at {}{}",
        created.merchant,
        created.subscription_id,
        fmt_usd(&created.amount),
        created.frequency().per_label()
    );
    Ok(())
}

/// PUT replaces the whole record, so unspecified fields keep their current
/// values from a fresh fetch.
fn update(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let current = ctx
        .api
        .subscriptions(false)?
        .into_iter()
        .find(|s| s.subscription_id == id)
        .ok_or_else(|| anyhow!("No subscription with id {}", id))?;

    let merchant = sub
        .get_one::<String>("merchant")
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| current.merchant.clone());
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => parse_decimal(raw)?,
        None => current.amount,
    };
    let errors = validate_subscription_input(&merchant, amount);
    if !errors.is_empty() {
        return Err(anyhow!(errors.join("; ")));
    }
    let frequency = match sub.get_one::<String>("frequency") {
        Some(raw) => parse_frequency(raw)?,
        None => current.frequency(),
    };
    let start_date = match sub.get_one::<String>("start") {
        Some(raw) => wire_datetime(raw)?,
        None => current
            .start_date
            .clone()
            .ok_or_else(|| anyhow!("Subscription {} has no start date; pass --start", id))?,
    };

    let updated = ctx.api.update_subscription(
        id,
        &SubscriptionRequest {
            merchant,
            amount,
            frequency: frequency.as_str().to_string(),
            start_date,
            first_post_at: None,
            is_active: Some(current.is_active),
        },
    )?;
    println!("Updated {} ({})", updated.merchant, updated.subscription_id);
    Ok(())
}

fn pause(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    ctx.api.pause_subscription(id)?;
    println!("Paused subscription {}", id);
    Ok(())
}

fn resume(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    ctx.api.resume_subscription(id)?;
    println!("Resumed subscription {}", id);
    Ok(())
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    ctx.api.delete_subscription(id)?;
    println!("Cancelled subscription {}", id);
    Ok(())
}

fn summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let subs: Vec<Subscription> = ctx.api.subscriptions(false)?;
    let today = Local::now().date_naive();
    let s = SubscriptionSummary::compute(&subs, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Monthly total", "Active", "Due this week"],
            vec![vec![
                fmt_usd(&s.monthly_total),
                s.active_count.to_string(),
                s.due_this_week.to_string(),
            ]],
        )
    );
    Ok(())
}
