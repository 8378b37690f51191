// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::context::Context;
use crate::models::CategoryMergeRequest;
use crate::utils::{category_icon, maybe_print_json, pretty_table, validate_category_name};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("rename", sub)) => rename(ctx, sub)?,
        Some(("rm", sub)) => remove(ctx, sub)?,
        Some(("merge", sub)) => merge(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| anyhow!("Invalid category id '{}'", raw))
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let categories = ctx.categories()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &categories)? {
        return Ok(());
    }
    let rows = categories
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                format!("{} {}", category_icon(&c.name), c.name),
                if c.system { "system" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Name", ""], rows));
    Ok(())
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    validate_category_name(name).map_err(|e| anyhow!(e))?;
    let created = ctx.api.create_category(name.trim())?;
    ctx.invalidate_categories();
    println!("Created category {} ({})", created.name, created.id);
    Ok(())
}

fn rename(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap();
    validate_category_name(name).map_err(|e| anyhow!(e))?;
    let updated = ctx.api.rename_category(id, name.trim())?;
    ctx.invalidate_categories();
    println!("Renamed category {} to {}", id, updated.name);
    Ok(())
}

fn require_not_system(ctx: &Context, id: i64) -> Result<()> {
    let is_system = ctx
        .categories()?
        .iter()
        .any(|c| c.id == id && c.system);
    if is_system {
        return Err(anyhow!("Category {} is a system category", id));
    }
    Ok(())
}

fn remove(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    require_not_system(ctx, id)?;
    ctx.api.delete_category(id)?;
    ctx.invalidate_categories();
    println!("Deleted category {}", id);
    Ok(())
}

fn merge(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let source_ids = sub
        .get_many::<String>("source")
        .unwrap()
        .map(|raw| parse_id(raw))
        .collect::<Result<Vec<_>>>()?;
    let target_id = parse_id(sub.get_one::<String>("target").unwrap())?;
    if source_ids.contains(&target_id) {
        return Err(anyhow!("Target category cannot also be a source"));
    }
    for id in &source_ids {
        require_not_system(ctx, *id)?;
    }
    let merge_budgets = sub.get_flag("merge-budgets").then_some(true);
    let req = CategoryMergeRequest {
        source_ids: source_ids.clone(),
        target_id,
    };
    ctx.api.merge_categories(&req, merge_budgets)?;
    ctx.invalidate_categories();
    println!(
        "Merged {} categor{} into {}",
        source_ids.len(),
        if source_ids.len() == 1 { "y" } else { "ies" },
        target_id
    );
    Ok(())
}
