// Copyright (c) 2025 Soumyadip Sarkar.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD"))
        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD"))
}

pub fn build_cli() -> Command {
    Command::new("purse")
        .version(crate_version!())
        .about("Personal finance ledger: transactions, debts, savings goals and reports")
        .arg(
            Arg::new("account")
                .long("account")
                .short('a')
                .global(true)
                .help("Account to work on (defaults to the configured default_account)"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(
            Command::new("account")
                .about("Inspect the current account")
                .subcommand(json_flags(Command::new("balance").about("Show balance")))
                .subcommand(json_flags(period_args(
                    Command::new("history").about("List transactions, newest first"),
                )))
                .subcommand(Command::new("interest").about("Book interest on a savings account")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction dated today")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("Other"),
                        )
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Record as income (category is forced to Income)"),
                        ),
                )
                .subcommand(json_flags(period_args(
                    Command::new("list")
                        .about("List transactions in ledger order")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports and analysis")
                .subcommand(Command::new("spending").about("Write this month's spending report"))
                .subcommand(Command::new("income").about("Write this month's income report"))
                .subcommand(json_flags(
                    Command::new("analysis").about("Top spending categories, all time"),
                ))
                .subcommand(json_flags(
                    Command::new("budget")
                        .about("Spent vs limit for a category this month")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )),
        )
        .subcommand(
            Command::new("debt")
                .about("Track money owed to or by you")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("due").long("due").required(true))
                        .arg(
                            Arg::new("loan")
                                .long("loan")
                                .action(ArgAction::SetTrue)
                                .help("Money owed to you"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("paid").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("unpaid").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .about("Move money from the account into a goal")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("fx").about("Currency conversion").subcommand(
                Command::new("convert")
                    .arg(Arg::new("amount").long("amount").required(true))
                    .arg(Arg::new("from").long("from").required(true))
                    .arg(
                        Arg::new("to")
                            .long("to")
                            .help("Target currency (defaults to the base_currency setting)"),
                    ),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
