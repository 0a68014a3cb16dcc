// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use super::budgets::month_or_current;
use super::{rates_for, requested_currency};
use crate::db::{budget_for_month, list_expenses};
use crate::fx::format_amount;
use crate::rates::RateProvider;
use crate::summary::{BudgetStatus, FlowState, Summary, summarize};
use crate::utils::{maybe_print_json, pretty_table, text_bar};

const BAR_WIDTH: usize = 30;

pub fn handle(conn: &Connection, provider: &dyn RateProvider, sub: &clap::ArgMatches) -> Result<()> {
    let s = build(conn, provider, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        render(&s);
    }
    Ok(())
}

/// Read both stores and compute the summary for the requested month and
/// display currency.
pub fn build(
    conn: &Connection,
    provider: &dyn RateProvider,
    sub: &clap::ArgMatches,
) -> Result<Summary> {
    let month = month_or_current(sub)?;
    let mut expenses = list_expenses(conn)?;
    if sub.get_flag("filter-month") {
        expenses.retain(|e| e.date.format("%Y-%m").to_string() == month);
    }
    let budget = budget_for_month(conn, &month)?;
    let requested = requested_currency(conn, sub)?;

    let mut codes = vec![requested.as_str()];
    if let Some(b) = &budget {
        codes.push(b.currency.as_str());
    }
    let rates = rates_for(conn, provider, &codes);
    Ok(summarize(&expenses, budget.as_ref(), rates.as_ref(), &requested))
}

fn render(s: &Summary) {
    let ccy = s.display_currency.as_str();
    println!("Total spent: {}", format_amount(s.total, ccy));

    if !s.categories.is_empty() {
        let rows = s
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format_amount(c.amount, ccy),
                    format!("{:.1}%", c.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", &format!("Spent ({})", ccy), "Share"], rows)
        );

        let max = s
            .categories
            .iter()
            .map(|c| c.amount)
            .max()
            .unwrap_or(Decimal::ZERO);
        let width = s.categories.iter().map(|c| c.category.len()).max().unwrap_or(0);
        for c in &s.categories {
            let frac = if max.is_zero() {
                Decimal::ZERO
            } else {
                c.amount / max
            };
            println!("{:<width$} {}", c.category, text_bar(frac, BAR_WIDTH));
        }
    }

    match &s.budget {
        Some(b) => {
            if b.entered_currency == ccy {
                println!("Budget ({}): {}", b.month, format_amount(b.amount, ccy));
            } else {
                println!(
                    "Budget ({}): {} (entered as {})",
                    b.month,
                    format_amount(b.amount, ccy),
                    format_amount(b.entered_amount, &b.entered_currency)
                );
            }
            match &b.status {
                BudgetStatus::Within { remaining, .. } => {
                    println!("Remaining: {}", format_amount(*remaining, ccy))
                }
                BudgetStatus::Over { overage } => {
                    println!("Over budget by {}!", format_amount(*overage, ccy))
                }
            }
            let progress = b.status.progress();
            println!(
                "{} {:.0}%",
                text_bar(progress, BAR_WIDTH),
                progress * Decimal::ONE_HUNDRED
            );
        }
        None => println!("No budget set."),
    }

    if s.state != FlowState::Ready {
        println!("Next: {}", s.state.next_step());
    }
}
