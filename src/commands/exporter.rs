// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use anyhow::{Context as _, Result, anyhow};
use chrono::Local;

use crate::commands::transactions::filters_from;
use crate::context::Context;
use crate::feed::TransactionFeed;
use crate::utils::display_category_name;

pub const EXPORT_HEADERS: [&str; 6] = ["Date", "Title", "Description", "Category", "Type", "Amount"];

/// Render the feed as CSV. The Title column carries the description; the
/// Description column is reserved for notes, which the wire does not carry
/// yet.
pub fn export_csv(feed: &TransactionFeed) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;
    for tx in &feed.transactions {
        wtr.write_record([
            tx.occurred_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            tx.description.clone(),
            String::new(),
            display_category_name(&tx.category),
            tx.kind.as_str().to_string(),
            format!("{:.2}", tx.amount),
        ])?;
    }
    let bytes = wtr.into_inner().context("Flush CSV")?;
    String::from_utf8(bytes).context("CSV is not valid UTF-8")
}

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    let csv_text = if m.get_flag("server") {
        let user_id = ctx
            .session
            .user_id()
            .ok_or_else(|| anyhow!("Server export needs a stored user id; run `oversave session set-token --user-id`"))?;
        ctx.api.export_transactions_csv(user_id)?
    } else {
        let filters = filters_from(m)?;
        let income = ctx.api.list_income()?;
        let expenses = ctx.api.list_expenses()?;
        let feed = TransactionFeed::from_records(income, expenses);
        let today = Local::now().date_naive();
        let filtered = TransactionFeed {
            transactions: feed
                .filtered(&filters, today)
                .into_iter()
                .cloned()
                .collect(),
        };
        export_csv(&filtered)?
    };

    match m.get_one::<String>("output") {
        Some(path) => {
            fs::write(path, &csv_text).with_context(|| format!("Write {}", path))?;
            println!("Exported transactions to {}", path);
        }
        None => print!("{}", csv_text),
    }
    Ok(())
}
