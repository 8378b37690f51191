// Copyright (c) 2025 OverSave Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the raw data as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("oversave")
        .version(crate_version!())
        .about("OverSave budgeting client: transactions, budgets, goals and coin rewards")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (default http://localhost:8080, or OVERSAVE_API_URL)"),
        )
        .subcommand(
            Command::new("session")
                .about("Manage the stored session")
                .subcommand(
                    Command::new("set-token")
                        .about("Store a bearer token")
                        .arg(Arg::new("token").required(true))
                        .arg(Arg::new("user-id").long("user-id").help("Numeric user id"))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(json_flags(
                    Command::new("show").about("Show the stored session"),
                ))
                .subcommand(Command::new("clear").about("Forget the stored session")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transaction feed")
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, filtered")
                        .arg(Arg::new("search").long("search").help("Match description or category"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type").help("income or expense"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("all, today, week, month or year"),
                        ),
                ))
                .subcommand(
                    Command::new("render")
                        .about("Print the feed as HTML fragments")
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(Arg::new("type").required(true).help("income or expense"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD or full timestamp"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("account-id").long("account-id")),
                )
                .subcommand(json_flags(
                    Command::new("summary").about("Income, expense and net totals"),
                )),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add").arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("merge")
                        .about("Merge source categories into a target")
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .required(true)
                                .action(ArgAction::Append)
                                .help("Source category id, repeatable"),
                        )
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("merge-budgets")
                                .long("merge-budgets")
                                .action(ArgAction::SetTrue)
                                .help("Also fold source budgets into the target"),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budgets per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("name").long("name").help("Custom display name")),
                )
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(Arg::new("category").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("list").about("Summaries for all budgeted categories"),
                ))
                .subcommand(
                    Command::new("delete").arg(Arg::new("category").required(true)),
                )
                .subcommand(
                    Command::new("render")
                        .about("Print a budget card as HTML")
                        .arg(Arg::new("category").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("due").long("due").required(true).help("YYYY-MM-DD")),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(
                    Command::new("update")
                        .about("Change a goal's name, target or due date")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("due").long("due")),
                )
                .subcommand(json_flags(
                    Command::new("contributions")
                        .about("List contributions to a goal")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
                ))
                .subcommand(
                    Command::new("contribute")
                        .about("Move cash into a goal")
                        .arg(Arg::new("goal").long("goal").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("account-id").long("account-id")),
                )
                .subcommand(
                    Command::new("render")
                        .about("Print goal cards as HTML")
                        .arg(Arg::new("id")),
                ),
        )
        .subcommand(
            Command::new("subscription")
                .about("Recurring subscriptions")
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("active")
                            .long("active")
                            .action(ArgAction::SetTrue)
                            .help("Only active subscriptions"),
                    ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("merchant").long("merchant").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .default_value("monthly")
                                .help("weekly, fortnightly, monthly, quarterly or yearly"),
                        )
                        .arg(Arg::new("start").long("start").required(true).help("YYYY-MM-DD or full timestamp")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Replace a subscription's details")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("merchant").long("merchant"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("frequency").long("frequency"))
                        .arg(Arg::new("start").long("start")),
                )
                .subcommand(Command::new("pause").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("resume").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Monthly total, active count and upcoming renewals"),
                )),
        )
        .subcommand(
            Command::new("coins")
                .about("Coin rewards")
                .subcommand(json_flags(Command::new("balance")))
                .subcommand(
                    Command::new("grant")
                        .about("Claim a reward grant")
                        .arg(
                            Arg::new("kind")
                                .required(true)
                                .help("transaction, budget-goal, savings-milestone, daily-streak, weekly-streak or challenge"),
                        ),
                )
                .subcommand(
                    Command::new("redeem").arg(Arg::new("item-id").required(true)),
                )
                .subcommand(json_flags(Command::new("history")))
                .subcommand(json_flags(
                    Command::new("shop").about("List redeemable items"),
                )),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Account overview")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(Command::new("render").about("Print dashboard cards as HTML"))
                .subcommand(json_flags(
                    Command::new("trend")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("month")
                                .help("week, month or year"),
                        ),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from a CSV file")
                .arg(Arg::new("file").required(true))
                .arg(Arg::new("account-id").long("account-id"))
                .arg(
                    Arg::new("no-rewards")
                        .long("no-rewards")
                        .action(ArgAction::SetTrue)
                        .help("Skip per-row coin grants"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions as CSV")
                .arg(Arg::new("output").long("output").short('o').help("Write to a file instead of stdout"))
                .arg(Arg::new("search").long("search"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("type").long("type"))
                .arg(Arg::new("date").long("date"))
                .arg(
                    Arg::new("server")
                        .long("server")
                        .action(ArgAction::SetTrue)
                        .help("Use the server-side export endpoint"),
                ),
        )
}
