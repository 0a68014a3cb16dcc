// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn currency_arg(help: &'static str) -> Arg {
    Arg::new("currency").long("currency").short('c').help(help)
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month as YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .version(crate_version!())
        .about("Track expenses against a monthly budget, in any currency")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (default: platform data dir)"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Never fetch exchange rates; use the cache or the base currency"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand(
                    Command::new("set")
                        .about("Set (or replace) a month's budget")
                        .arg(Arg::new("amount").required(true).allow_negative_numbers(true))
                        .arg(currency_arg(
                            "Currency the amount is entered in (default: display currency)",
                        ))
                        .arg(month_arg()),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show a month's budget")
                        .arg(month_arg())
                        .arg(currency_arg("Display currency")),
                )
                .subcommand(json_args(
                    Command::new("list").about("List budgets for every month"),
                )),
        )
        .subcommand(
            Command::new("expense")
                .about("Expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(Arg::new("amount").required(true).allow_negative_numbers(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('k')
                                .required(true),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .short('d')
                                .help("YYYY-MM-DD (default: today)"),
                        )
                        .arg(Arg::new("note").long("note").short('n'))
                        .arg(currency_arg(
                            "Currency the amount is entered in (default: display currency)",
                        )),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List expenses")
                        .arg(Arg::new("category").long("category").short('k'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(currency_arg("Display currency")),
                ))
                .subcommand(Command::new("categories").about("Show the suggested categories")),
        )
        .subcommand(json_args(
            Command::new("summary")
                .about("Spending summary against the budget")
                .arg(month_arg())
                .arg(currency_arg("Display currency"))
                .arg(
                    Arg::new("filter-month")
                        .long("filter-month")
                        .action(ArgAction::SetTrue)
                        .help("Only count expenses dated in the budget month"),
                ),
        ))
        .subcommand(
            Command::new("status")
                .about("Show what to do next")
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("fx")
                .about("Currencies and exchange rates")
                .subcommand(
                    Command::new("rates").about("Show exchange rates").arg(
                        Arg::new("refresh")
                            .long("refresh")
                            .action(ArgAction::SetTrue)
                            .help("Fetch even if the cached table is fresh"),
                    ),
                )
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between currencies")
                        .arg(Arg::new("amount").required(true).allow_negative_numbers(true))
                        .arg(Arg::new("from").required(true))
                        .arg(Arg::new("to").required(true)),
                )
                .subcommand(Command::new("currencies").about("List supported currencies"))
                .subcommand(
                    Command::new("set-display")
                        .about("Set the default display currency")
                        .arg(Arg::new("currency").required(true)),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("expenses")
                    .about("Export expenses (amounts in USD)")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .short('f')
                            .default_value("csv")
                            .value_parser(["csv", "json"]),
                    )
                    .arg(Arg::new("out").long("out").short('o').required(true)),
            ),
        )
}
