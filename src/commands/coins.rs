// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use log::warn;

use crate::coins::{GrantKind, Wallet, grant_for};
use crate::context::Context;
use crate::models::RedeemRequest;
use crate::notify::Notifier;
use crate::session::Session;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &Context, notifier: &dyn Notifier, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(ctx, sub)?,
        Some(("grant", sub)) => grant(ctx, notifier, sub)?,
        Some(("redeem", sub)) => redeem(ctx, notifier, sub)?,
        Some(("history", sub)) => history(ctx, sub)?,
        Some(("shop", sub)) => shop(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn cache_balance(coins: i64) {
    // Cache refresh is best effort; the server copy is the real one.
    let result = Session::load().and_then(|mut s| {
        s.coin_balance = Some(coins);
        s.save()
    });
    if let Err(e) = result {
        warn!("could not cache coin balance: {}", e);
    }
}

fn balance(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let b = ctx.api.coin_balance()?;
    let coins = b.as_coins();
    cache_balance(coins);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &serde_json::json!({ "balance": coins }))? {
        return Ok(());
    }
    println!("🪙 {} coins", coins);
    Ok(())
}

fn parse_kind(raw: &str) -> Result<GrantKind> {
    match raw.trim().to_lowercase().as_str() {
        "transaction" => Ok(GrantKind::TransactionLogged),
        "budget-goal" => Ok(GrantKind::BudgetGoal),
        "savings-milestone" => Ok(GrantKind::SavingsMilestone),
        "daily-streak" => Ok(GrantKind::DailyStreak),
        "weekly-streak" => Ok(GrantKind::WeeklyStreak),
        "challenge" => Ok(GrantKind::Challenge),
        _ => Err(anyhow!(
            "Unknown grant kind '{}'; see `oversave coins grant --help`",
            raw
        )),
    }
}

fn grant(ctx: &Context, notifier: &dyn Notifier, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let req = grant_for(kind);
    let resp = ctx.api.grant_coins(&req)?;
    notifier.coins_earned(req.amount, kind.label());
    if let Some(after) = resp.balance_after {
        cache_balance(after);
        println!("Balance: {} coins", after);
    }
    Ok(())
}

fn redeem(ctx: &Context, notifier: &dyn Notifier, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("item-id").unwrap();
    let item_id: i64 = raw.parse().map_err(|_| anyhow!("Invalid item id '{}'", raw))?;

    let items = ctx.api.reward_items()?;
    let item = items
        .iter()
        .find(|i| i.item_id == item_id)
        .ok_or_else(|| anyhow!("No shop item with id {}", item_id))?;

    // Fast-fail locally before the redeem round trip; the server still
    // enforces the balance.
    let wallet = match ctx.api.coin_balance() {
        Ok(b) => Wallet::new(b.as_coins()),
        Err(e) => {
            warn!("balance fetch failed, using cached value: {}", e);
            Wallet::new(Session::load()?.coin_balance.unwrap_or(0))
        }
    };
    if !wallet.can_afford(item.price) {
        notifier.insufficient_coins(item.price, wallet.balance);
        return Ok(());
    }

    match ctx.api.redeem_coins(&RedeemRequest { item_id }) {
        Ok(resp) => {
            let name = resp.item_name.as_deref().unwrap_or(&item.item_name);
            notify_redeemed(notifier, name, resp.order_id);
            if let Some(after) = resp.balance_after {
                cache_balance(after);
                println!("Balance: {} coins", after);
            }
        }
        Err(e) => {
            // Server said no; re-sync the cached balance before surfacing it.
            if let Ok(b) = ctx.api.coin_balance() {
                cache_balance(b.as_coins());
            }
            return Err(e.into());
        }
    }
    Ok(())
}

/// Redeem confirmations go through the notifier seam like the other reward
/// messages.
pub fn notify_redeemed(notifier: &dyn Notifier, item_name: &str, order_id: Option<i64>) {
    match order_id {
        Some(order) => notifier.info(&format!("Redeemed {} (order {})", item_name, order)),
        None => notifier.info(&format!("Redeemed {}", item_name)),
    }
}

fn history(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let events = ctx.api.coin_history()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &events)? {
        return Ok(());
    }
    let rows = events
        .iter()
        .map(|e| {
            vec![
                e.created_at.clone().unwrap_or_default(),
                e.source_type.clone().unwrap_or_default(),
                e.item_name.clone().unwrap_or_default(),
                e.amount.map(|a| a.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["When", "Source", "Item", "Coins"], rows));
    Ok(())
}

fn shop(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let items = ctx.api.reward_items()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.item_id.to_string(),
                format!(
                    "{} {}",
                    i.emoji.as_deref().unwrap_or("🎁"),
                    i.item_name
                ),
                i.price.to_string(),
                i.stock_qty.map(|q| q.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Item", "Price", "Stock"], rows));
    Ok(())
}
