// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::db::{get_display_currency, set_display_currency};
use crate::fx::{
    BASE_CURRENCY, format_amount, normalize_code, supported_currencies, symbol_for, try_convert,
};
use crate::rates::{RateProvider, current_rates, load_cached};
use crate::utils::{parse_decimal, pretty_table};

pub fn handle(conn: &Connection, provider: &dyn RateProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("rates", sub)) => show_rates(conn, provider, sub.get_flag("refresh"))?,
        Some(("convert", sub)) => convert_amount(conn, provider, sub)?,
        Some(("currencies", _)) => list_currencies(conn)?,
        Some(("set-display", sub)) => {
            let ccy = normalize_code(sub.get_one::<String>("currency").unwrap())?;
            if !supported_currencies().contains(&ccy.as_str()) {
                eprintln!("note: {} is not in the supported list; it will be shown as-is", ccy);
            }
            set_display_currency(conn, &ccy)?;
            println!("Display currency set to {}", ccy);
        }
        _ => {}
    }
    Ok(())
}

fn show_rates(conn: &Connection, provider: &dyn RateProvider, refresh: bool) -> Result<()> {
    let Some(rates) = current_rates(conn, provider, BASE_CURRENCY, Utc::now(), refresh) else {
        println!("Exchange rates unavailable; amounts are shown in {}.", BASE_CURRENCY);
        return Ok(());
    };
    if let Some(cached) = load_cached(conn, BASE_CURRENCY)? {
        println!("Rates per 1 {} (fetched {})", BASE_CURRENCY, cached.fetched_at.to_rfc3339());
    }
    let rows = supported_currencies()
        .iter()
        .filter(|c| **c != BASE_CURRENCY)
        .map(|c| {
            let rate = rates
                .get(*c)
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string());
            vec![c.to_string(), symbol_for(c).to_string(), rate]
        })
        .collect();
    println!("{}", pretty_table(&["Currency", "Symbol", "Rate"], rows));
    Ok(())
}

fn convert_amount(
    conn: &Connection,
    provider: &dyn RateProvider,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = normalize_code(sub.get_one::<String>("from").unwrap())?;
    let to = normalize_code(sub.get_one::<String>("to").unwrap())?;
    let rates = super::rates_for(conn, provider, &[from.as_str(), to.as_str()]);
    match try_convert(amount, &from, &to, rates.as_ref()) {
        Ok(v) => println!("{} -> {}", format_amount(amount, &from), format_amount(v, &to)),
        Err(err) => println!(
            "{} -> {} (not converted: {})",
            format_amount(amount, &from),
            format_amount(amount, &from),
            err
        ),
    }
    Ok(())
}

fn list_currencies(conn: &Connection) -> Result<()> {
    let display = get_display_currency(conn)?;
    let rows = supported_currencies()
        .iter()
        .map(|c| {
            let mut marks = Vec::new();
            if *c == BASE_CURRENCY {
                marks.push("base");
            }
            if *c == display {
                marks.push("display");
            }
            vec![c.to_string(), symbol_for(c).to_string(), marks.join(", ")]
        })
        .collect();
    println!("{}", pretty_table(&["Currency", "Symbol", ""], rows));
    Ok(())
}
