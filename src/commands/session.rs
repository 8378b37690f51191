// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::session::{Session, UserInfo};
use crate::utils::maybe_print_json;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-token", sub)) => set_token(sub)?,
        Some(("show", sub)) => show(sub)?,
        Some(("clear", _)) => {
            Session::clear()?;
            println!("Session cleared.");
        }
        _ => {}
    }
    Ok(())
}

fn set_token(sub: &clap::ArgMatches) -> Result<()> {
    let token = sub.get_one::<String>("token").unwrap();
    // A corrupt session file must not block storing a fresh token.
    let mut session = Session::load_or_default();
    session.session_token = Some(token.trim().to_string());
    if let Some(raw) = sub.get_one::<String>("user-id") {
        let user_id: i64 = raw
            .parse()
            .with_context(|| format!("Invalid user id '{}'", raw))?;
        let email = sub.get_one::<String>("email").cloned();
        session.user = Some(UserInfo {
            user_id,
            email,
            first_name: None,
            last_name: None,
        });
    }
    session.save()?;
    println!("Token stored at {}", Session::path()?.display());
    Ok(())
}

fn show(sub: &clap::ArgMatches) -> Result<()> {
    let session = Session::load()?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &session)? {
        return Ok(());
    }
    match &session.session_token {
        // Only the tail is shown; the full token stays on disk.
        Some(token) => {
            let tail: String = token
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            println!("Token: ...{}", tail);
        }
        None => println!("No token stored."),
    }
    if let Some(user) = &session.user {
        println!(
            "User: {} {}",
            user.user_id,
            user.email.as_deref().unwrap_or("")
        );
    }
    if let Some(coins) = session.coin_balance {
        println!("Cached coin balance: {}", coins);
    }
    Ok(())
}
