// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::errors::ValidationError;

const UA: &str = concat!("spendwise/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidMonth(s.to_string()))?;
    if s.len() != 7 {
        return Err(ValidationError::InvalidMonth(s.to_string()));
    }
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn current_month() -> String {
    today().format("%Y-%m").to_string()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// `[#########-]` style bar, `fraction` clamped to `[0, 1]`.
pub fn text_bar(fraction: Decimal, width: usize) -> String {
    let f = fraction.clamp(Decimal::ZERO, Decimal::ONE);
    let filled = (f * Decimal::from(width as u64))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
