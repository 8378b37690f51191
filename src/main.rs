// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use oversave::api::{ApiClient, DEFAULT_BASE_URL};
use oversave::context::Context;
use oversave::notify::TermNotifier;
use oversave::session::Session;
use oversave::{cli, commands};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let base_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .or_else(|| std::env::var("OVERSAVE_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Session commands must work even when session.json is unreadable;
    // everything else needs the real thing.
    if let Some(("session", sub)) = matches.subcommand() {
        commands::session::handle(sub)?;
        return Ok(());
    }

    let session = Session::load()?;
    let api = ApiClient::new(base_url, session.session_token.clone(), session.user_id())?;
    let ctx = Context::new(api, session);
    let notifier = TermNotifier;

    match matches.subcommand() {
        Some(("tx", sub)) => commands::transactions::handle(&ctx, &notifier, sub)?,
        Some(("category", sub)) => commands::categories::handle(&ctx, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&ctx, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&ctx, &notifier, sub)?,
        Some(("subscription", sub)) => commands::subscriptions::handle(&ctx, sub)?,
        Some(("coins", sub)) => commands::coins::handle(&ctx, &notifier, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&ctx, sub)?,
        Some(("import", sub)) => commands::importer::handle(&ctx, &notifier, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
