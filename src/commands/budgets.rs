// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::{rates_for, requested_currency};
use crate::db::{budget_for_month, list_budgets, upsert_budget};
use crate::fx::{convert, format_amount, resolve_display_currency};
use crate::models::BudgetRecord;
use crate::rates::RateProvider;
use crate::utils::{current_month, maybe_print_json, parse_decimal, parse_month, pretty_table};

pub fn handle(conn: &Connection, provider: &dyn RateProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            set(conn, sub)?;
        }
        Some(("show", sub)) => show(conn, provider, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn month_or_current(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => Ok(parse_month(m)?),
        None => Ok(current_month()),
    }
}

/// Save the month's budget in the currency it was entered in, replacing any
/// earlier budget for that month.
/// No conversion happens here, so rates are never consulted.
pub fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<BudgetRecord> {
    let month = month_or_current(sub)?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let currency = requested_currency(conn, sub)?;
    let budget = BudgetRecord::new(&month, amount, &currency)?;
    upsert_budget(conn, &budget)?;
    println!(
        "Budget for {} set to {}",
        budget.month,
        format_amount(budget.amount, &budget.currency)
    );
    Ok(budget)
}

fn show(conn: &Connection, provider: &dyn RateProvider, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let Some(budget) = budget_for_month(conn, &month)? else {
        println!("No budget set for {}", month);
        return Ok(());
    };
    let requested = requested_currency(conn, sub)?;
    let rates = rates_for(conn, provider, &[requested.as_str(), budget.currency.as_str()]);
    let display = resolve_display_currency(&requested, rates.as_ref());
    let shown = convert(budget.amount, &budget.currency, &display, rates.as_ref());

    if display == budget.currency {
        println!(
            "Budget for {}: {}",
            month,
            format_amount(budget.amount, &budget.currency)
        );
    } else {
        println!(
            "Budget for {}: {} (entered as {})",
            month,
            format_amount(shown, &display),
            format_amount(budget.amount, &budget.currency)
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = list_budgets(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    format!("{:.2}", b.amount),
                    b.currency.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Budget", "Currency"], rows)
        );
    }
    Ok(())
}
