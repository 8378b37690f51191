// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::Local;
use log::warn;

use crate::coins::{GrantKind, grant_for};
use crate::context::Context;
use crate::feed::{DateFilter, Filters, TransactionFeed};
use crate::models::{NewCashflow, TransactionKind};
use crate::notify::Notifier;
use crate::render::{render_fetch_error, render_summary, render_transaction_list};
use crate::utils::{fmt_usd, maybe_print_json, parse_datetime, parse_decimal, pretty_table};

pub fn handle(ctx: &Context, notifier: &dyn Notifier, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("render", sub)) => render(ctx, sub)?,
        Some(("add", sub)) => add(ctx, notifier, sub)?,
        Some(("summary", sub)) => summary(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filters_from(sub: &clap::ArgMatches) -> Result<Filters> {
    let kind = match sub.get_one::<String>("type") {
        Some(raw) => Some(
            TransactionKind::parse(raw)
                .ok_or_else(|| anyhow!("Unknown type '{}', expected income or expense", raw))?,
        ),
        None => None,
    };
    let date = match sub.get_one::<String>("date") {
        Some(raw) => DateFilter::parse(raw).ok_or_else(|| {
            anyhow!("Unknown date filter '{}', expected all, today, week, month or year", raw)
        })?,
        None => DateFilter::All,
    };
    Ok(Filters {
        search: sub.get_one::<String>("search").cloned(),
        category: sub.get_one::<String>("category").cloned(),
        kind,
        date,
    })
}

fn load_feed(ctx: &Context) -> Result<TransactionFeed> {
    let income = ctx.api.list_income()?;
    let expenses = ctx.api.list_expenses()?;
    Ok(TransactionFeed::from_records(income, expenses))
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let filters = filters_from(sub)?;
    let today = Local::now().date_naive();
    let feed = load_feed(ctx)?;
    let rows_data = feed.filtered(&filters, today);

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows_data)? {
        return Ok(());
    }
    let rows = rows_data
        .iter()
        .map(|tx| {
            vec![
                tx.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
                tx.description.clone(),
                tx.category.clone(),
                tx.kind.as_str().to_string(),
                fmt_usd(&tx.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Description", "Category", "Type", "Amount"], rows)
    );
    Ok(())
}

fn render(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let filters = filters_from(sub)?;
    let today = Local::now().date_naive();
    // A failed refresh becomes a retry fragment; existing page content is
    // left for the caller to keep.
    let feed = match load_feed(ctx) {
        Ok(feed) => feed,
        Err(e) => {
            println!("{}", render_fetch_error(&e.to_string()));
            return Ok(());
        }
    };
    println!("{}", render_summary(&feed.summary()));
    let visible = feed.filtered(&filters, today);
    println!("{}", render_transaction_list(&visible, today));
    Ok(())
}

fn add(ctx: &Context, notifier: &dyn Notifier, sub: &clap::ArgMatches) -> Result<()> {
    let kind = TransactionKind::parse(sub.get_one::<String>("type").unwrap())
        .ok_or_else(|| anyhow!("Type must be income or expense"))?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount <= rust_decimal::Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than 0"));
    }
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();

    let occurred_at = match sub.get_one::<String>("date") {
        Some(raw) => parse_datetime(raw)?,
        None => Local::now().naive_local(),
    };

    let account_id = match sub.get_one::<String>("account-id") {
        Some(raw) => raw.parse::<i64>().map_err(|_| anyhow!("Invalid account id '{}'", raw))?,
        None => ctx
            .default_account(false)?
            .ok_or_else(|| anyhow!("No accounts on the server; pass --account-id"))?
            .id,
    };

    // Income takes a category too; the backend treats it as optional on
    // both record kinds.
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(
            ctx.category_id_by_name(name)?
                .ok_or_else(|| anyhow!("Unknown category '{}'", name))?,
        ),
        None => None,
    };

    let req = NewCashflow {
        amount,
        description,
        occurred_at: occurred_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        account_id,
        category_id,
    };
    let saved = match kind {
        TransactionKind::Income => ctx.api.add_income(&req)?,
        TransactionKind::Expense => ctx.api.add_expense(&req)?,
    };
    println!("Recorded {} of {}", kind.as_str(), fmt_usd(&saved.amount));
    if let Some(balance) = saved.updated_balance {
        println!("Account balance: {}", fmt_usd(&balance));
    }

    // Reward grant failure never undoes the transaction.
    let grant = grant_for(GrantKind::TransactionLogged);
    match ctx.api.grant_coins(&grant) {
        Ok(_) => notifier.coins_earned(grant.amount, GrantKind::TransactionLogged.label()),
        Err(e) => warn!("coin grant failed: {}", e),
    }
    Ok(())
}

fn summary(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let feed = load_feed(ctx)?;
    let s = feed.summary();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net", "Count"],
            vec![vec![
                fmt_usd(&s.income),
                fmt_usd(&s.expenses),
                fmt_usd(&s.net),
                s.count.to_string(),
            ]],
        )
    );
    Ok(())
}
