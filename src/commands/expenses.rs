// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{rates_for, requested_currency};
use crate::db::{insert_expense, list_expenses};
use crate::fx::{BASE_CURRENCY, RateTable, convert, format_amount, resolve_display_currency};
use crate::errors::ValidationError;
use crate::models::{DEFAULT_CATEGORIES, ExpenseRecord, NewExpense};
use crate::rates::RateProvider;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, today};

pub fn handle(conn: &Connection, provider: &dyn RateProvider, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(conn, provider, sub)?;
        }
        Some(("list", sub)) => list(conn, provider, sub)?,
        Some(("categories", _)) => {
            let rows = DEFAULT_CATEGORIES
                .iter()
                .map(|c| vec![c.to_string()])
                .collect();
            println!("{}", pretty_table(&["Category"], rows));
        }
        _ => {}
    }
    Ok(())
}

/// Record an expense. The entered amount is converted to the base currency
/// before it is stored.
pub fn add(
    conn: &Connection,
    provider: &dyn RateProvider,
    sub: &clap::ArgMatches,
) -> Result<ExpenseRecord> {
    let entered = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let note = sub.get_one::<String>("note").map(String::as_str);
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    // reject bad input before any rate lookup
    let expense = NewExpense::new(date, entered, category, note)?;

    let requested = requested_currency(conn, sub)?;
    let rates = rates_for(conn, provider, &[requested.as_str()]);
    let currency = resolve_display_currency(&requested, rates.as_ref());
    let base_amount = convert(expense.amount, &currency, BASE_CURRENCY, rates.as_ref());
    if base_amount <= Decimal::ZERO {
        return Err(ValidationError::RoundsToZero {
            amount: entered.to_string(),
            currency,
        }
        .into());
    }

    let rec = insert_expense(
        conn,
        &NewExpense::new(
            expense.date,
            base_amount,
            &expense.category,
            expense.note.as_deref(),
        )?,
    )?;
    if currency == BASE_CURRENCY {
        println!(
            "Added {} for {} on {}",
            format_amount(rec.amount, BASE_CURRENCY),
            rec.category,
            rec.date
        );
    } else {
        println!(
            "Added {} ({}) for {} on {}",
            format_amount(entered, &currency),
            format_amount(rec.amount, BASE_CURRENCY),
            rec.category,
            rec.date
        );
    }
    Ok(rec)
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub note: String,
}

/// Stored expenses, newest first, with amounts in `currency`.
pub fn query_rows(
    conn: &Connection,
    sub: &clap::ArgMatches,
    rates: Option<&RateTable>,
    currency: &str,
) -> Result<Vec<ExpenseRow>> {
    let category = sub.get_one::<String>("category");
    let mut data: Vec<ExpenseRow> = list_expenses(conn)?
        .into_iter()
        .rev()
        .filter(|e| category.is_none_or(|c| e.category.eq_ignore_ascii_case(c)))
        .map(|e| ExpenseRow {
            id: e.id,
            date: e.date.to_string(),
            category: e.category,
            amount: convert(e.amount, BASE_CURRENCY, currency, rates),
            currency: currency.to_string(),
            note: e.note.unwrap_or_default(),
        })
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn list(conn: &Connection, provider: &dyn RateProvider, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let requested = requested_currency(conn, sub)?;
    let rates = rates_for(conn, provider, &[requested.as_str()]);
    let currency = resolve_display_currency(&requested, rates.as_ref());
    let data = query_rows(conn, sub, rates.as_ref(), &currency)?;

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    format_amount(r.amount, &r.currency),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}
