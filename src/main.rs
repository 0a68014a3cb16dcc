// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendwise::rates::{HttpRateProvider, OfflineRateProvider, RateProvider};
use spendwise::{cli, commands, db};

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spendwise={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    let db_override = matches.get_one::<String>("db").map(String::as_str);
    let conn = db::open_or_init(db_override)?;
    let provider: Box<dyn RateProvider> = if matches.get_flag("offline") {
        Box::new(OfflineRateProvider)
    } else {
        Box::new(HttpRateProvider::new()?)
    };
    let provider = provider.as_ref();

    match matches.subcommand() {
        Some(("init", _)) => match db_override {
            Some(p) => println!("Database initialized at {}", p),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("budget", sub)) => commands::budgets::handle(&conn, provider, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, provider, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, provider, sub)?,
        Some(("status", sub)) => commands::status::handle(&conn, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&conn, provider, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
