// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV import. Parsing is separated from the network phase so the row rules
//! are testable: a malformed row is skipped and counted, never fatal.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use anyhow::{Context as _, Result, anyhow};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use log::warn;
use rust_decimal::Decimal;

use crate::api::ApiError;
use crate::coins::{GrantKind, grant_for};
use crate::context::Context;
use crate::models::{NewCashflow, TransactionKind};
use crate::notify::Notifier;
use crate::utils::{parse_datetime, parse_decimal};

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRecord {
    pub description: String,
    pub amount: Decimal,
    pub occurred_at: NaiveDateTime,
    pub kind: TransactionKind,
    pub category: Option<String>,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub records: Vec<ImportRecord>,
    pub skipped: usize,
}

/// Column positions resolved from the header row, case-insensitively.
struct Columns {
    datetime: usize,
    description: usize,
    amount: usize,
    kind: usize,
    category: Option<usize>,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (i, h) in headers.iter().enumerate() {
        by_name.entry(h.trim().to_lowercase()).or_insert(i);
    }
    let required = |name: &str| {
        by_name
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("Missing required column: \"{}\"", name))
    };
    Ok(Columns {
        datetime: required("datetime")?,
        description: required("description")?,
        amount: required("amount")?,
        kind: required("type")?,
        category: by_name.get("category").copied(),
    })
}

/// Parse the CSV. Rows with an unparseable datetime, amount or type are
/// skipped and counted; a missing header is the only hard error.
pub fn read_import_records<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let columns = resolve_columns(rdr.headers().context("CSV has no header row")?)?;

    let mut report = ImportReport::default();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let get = |i: usize| rec.get(i).unwrap_or("").trim();

        let occurred_at = match parse_datetime(get(columns.datetime)) {
            Ok(dt) => dt,
            Err(e) => {
                warn!("row {}: {}; skipped", line + 2, e);
                report.skipped += 1;
                continue;
            }
        };
        let amount = match parse_decimal(get(columns.amount)) {
            Ok(v) if v > Decimal::ZERO => v,
            _ => {
                warn!("row {}: bad amount '{}'; skipped", line + 2, get(columns.amount));
                report.skipped += 1;
                continue;
            }
        };
        let kind = match TransactionKind::parse(get(columns.kind)) {
            Some(k) => k,
            None => {
                warn!("row {}: bad type '{}'; skipped", line + 2, get(columns.kind));
                report.skipped += 1;
                continue;
            }
        };
        let description = match get(columns.description) {
            "" => "Imported transaction".to_string(),
            s => s.to_string(),
        };
        let category = columns
            .category
            .map(|i| get(i).to_string())
            .filter(|s| !s.is_empty());

        report.records.push(ImportRecord {
            description,
            amount,
            occurred_at,
            kind,
            category,
        });
    }
    Ok(report)
}

/// Wire payload for one parsed row; identical shape for income and expenses.
pub fn cashflow_request(
    record: &ImportRecord,
    account_id: i64,
    category_id: Option<i64>,
) -> NewCashflow {
    NewCashflow {
        amount: record.amount,
        description: record.description.clone(),
        occurred_at: record.occurred_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        account_id,
        category_id,
    }
}

pub fn handle(ctx: &Context, notifier: &dyn Notifier, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("file").unwrap().trim();
    let file = File::open(path).with_context(|| format!("Open CSV {}", path))?;
    let report = read_import_records(file)?;

    let account_id = match m.get_one::<String>("account-id") {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| anyhow!("Invalid account id '{}'", raw))?,
        None => ctx
            .default_account(false)?
            .ok_or_else(|| anyhow!("No accounts on the server; pass --account-id"))?
            .id,
    };
    let rewards = !m.get_flag("no-rewards");

    // Case-insensitive name -> id map, extended as categories are created.
    let mut category_ids: HashMap<String, i64> = ctx
        .categories()?
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();

    let mut imported = 0usize;
    let mut failed = 0usize;
    for record in &report.records {
        // Both kinds carry the category through; the backend accepts an
        // optional categoryId on income too.
        let category_id = match &record.category {
            Some(name) => match ensure_category(ctx, &mut category_ids, name) {
                Ok(id) => id,
                Err(e) => {
                    warn!("category '{}': {}; row imported uncategorized", name, e);
                    None
                }
            },
            None => None,
        };

        let req = cashflow_request(record, account_id, category_id);
        let result = match record.kind {
            TransactionKind::Income => ctx.api.add_income(&req).map(|_| ()),
            TransactionKind::Expense => ctx.api.add_expense(&req).map(|_| ()),
        };
        match result {
            Ok(()) => {
                imported += 1;
                if rewards {
                    let grant = grant_for(GrantKind::TransactionLogged);
                    if let Err(e) = ctx.api.grant_coins(&grant) {
                        warn!("coin grant failed: {}", e);
                    }
                }
            }
            // One failed row does not abort the rest of the file.
            Err(e) => {
                warn!("import of '{}' failed: {}", record.description, e);
                failed += 1;
            }
        }
    }

    println!(
        "Imported {} transaction{} from {}",
        imported,
        if imported == 1 { "" } else { "s" },
        path
    );
    if report.skipped > 0 {
        println!("Skipped {} malformed row(s)", report.skipped);
    }
    if failed > 0 {
        println!("Failed to import {} row(s); see the log", failed);
    }
    if rewards && imported > 0 {
        notifier.coins_earned(
            imported as i64 * GrantKind::TransactionLogged.amount(),
            GrantKind::TransactionLogged.label(),
        );
    }
    Ok(())
}

/// Resolve a category by name, creating it when missing. A create that races
/// an existing name falls back to a fresh lookup.
fn ensure_category(
    ctx: &Context,
    cache: &mut HashMap<String, i64>,
    name: &str,
) -> Result<Option<i64>> {
    let key = name.trim().to_lowercase();
    if let Some(id) = cache.get(&key) {
        return Ok(Some(*id));
    }
    match ctx.api.create_category(name.trim()) {
        Ok(created) => {
            ctx.invalidate_categories();
            cache.insert(key, created.id);
            Ok(Some(created.id))
        }
        Err(ApiError::Http { status: 409, .. }) => {
            ctx.invalidate_categories();
            let id = ctx.category_id_by_name(name)?;
            if let Some(id) = id {
                cache.insert(key, id);
            }
            Ok(id)
        }
        Err(e) => Err(e.into()),
    }
}
