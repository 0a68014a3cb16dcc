// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod expenses;
pub mod exporter;
pub mod fx;
pub mod status;
pub mod summary;

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::fx::{BASE_CURRENCY, RateTable, normalize_code};
use crate::rates::{RateProvider, current_rates};

/// The `--currency` flag if given, else the stored display currency.
pub fn requested_currency(conn: &Connection, sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("currency") {
        Some(c) => Ok(normalize_code(c)?),
        None => crate::db::get_display_currency(conn),
    }
}

/// Rates are only looked up when one of `codes` is not the base currency.
/// Prints a warning when they are needed but unavailable.
pub fn rates_for(
    conn: &Connection,
    provider: &dyn RateProvider,
    codes: &[&str],
) -> Option<RateTable> {
    if codes.iter().all(|c| *c == BASE_CURRENCY) {
        return None;
    }
    let rates = current_rates(conn, provider, BASE_CURRENCY, Utc::now(), false);
    if rates.is_none() {
        eprintln!(
            "warning: exchange rates unavailable, using {} only",
            BASE_CURRENCY
        );
    }
    rates
}
