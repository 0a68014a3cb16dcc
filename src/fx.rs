// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Currency conversion over a [`RateTable`], pivoting through the base currency.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::errors::ValidationError;

/// Every stored expense amount is denominated in this currency.
pub const BASE_CURRENCY: &str = "USD";

/// `code -> rate`, where one unit of [`BASE_CURRENCY`] buys `rate` units of `code`.
pub type RateTable = BTreeMap<String, Decimal>;

const SUPPORTED: &[&str] = &["USD", "EUR", "GBP", "NGN", "JPY", "CAD", "AUD"];

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("exchange rate for {0} is zero")]
    DivisionByZero(String),
    #[error("converting {amount} {from} -> {to} overflowed")]
    Overflow {
        amount: Decimal,
        from: String,
        to: String,
    },
}

/// Convert `amount` from `from` to `to`, rounded to two decimal places.
///
/// No rates (or an empty table) and same-currency conversions are the
/// identity. A code missing from `rates` is priced at 1; this leniency keeps
/// unknown codes displayable and is not checked against real-world rates.
pub fn try_convert(
    amount: Decimal,
    from: &str,
    to: &str,
    rates: Option<&RateTable>,
) -> Result<Decimal, ConversionError> {
    let rates = match rates {
        Some(r) if !r.is_empty() => r,
        _ => return Ok(amount),
    };
    if from == to {
        return Ok(amount);
    }
    let overflow = || ConversionError::Overflow {
        amount,
        from: from.to_string(),
        to: to.to_string(),
    };

    let base_amount = if from == BASE_CURRENCY {
        amount
    } else {
        let r = rate_or_one(rates, from);
        if r.is_zero() {
            return Err(ConversionError::DivisionByZero(from.to_string()));
        }
        amount.checked_div(r).ok_or_else(overflow)?
    };
    let converted = if to == BASE_CURRENCY {
        base_amount
    } else {
        base_amount
            .checked_mul(rate_or_one(rates, to))
            .ok_or_else(overflow)?
    };
    Ok(converted.round_dp(2))
}

/// [`try_convert`] with the fail-to-identity fallback applied: any
/// conversion failure returns `amount` unchanged.
pub fn convert(amount: Decimal, from: &str, to: &str, rates: Option<&RateTable>) -> Decimal {
    match try_convert(amount, from, to, rates) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(%err, "conversion failed; showing unconverted amount");
            amount
        }
    }
}

fn rate_or_one(rates: &RateTable, code: &str) -> Decimal {
    match rates.get(code) {
        Some(r) => *r,
        None => {
            tracing::debug!(code, "no rate for currency, assuming 1");
            Decimal::ONE
        }
    }
}

pub fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "NGN" => "₦",
        "JPY" => "¥",
        "CAD" => "C$",
        "AUD" => "A$",
        other => other,
    }
}

pub fn supported_currencies() -> &'static [&'static str] {
    SUPPORTED
}

pub fn format_amount(amount: Decimal, code: &str) -> String {
    let sym = symbol_for(code);
    if sym == code {
        format!("{} {:.2}", code, amount)
    } else {
        format!("{}{:.2}", sym, amount)
    }
}

/// Uppercase and check a three-letter currency code.
pub fn normalize_code(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim().to_uppercase();
    if CODE_RE.is_match(&code) {
        Ok(code)
    } else {
        Err(ValidationError::InvalidCurrency(raw.to_string()))
    }
}

/// The currency amounts are actually shown (and entered) in. Without rates
/// the app is locked to the base currency.
pub fn resolve_display_currency(requested: &str, rates: Option<&RateTable>) -> String {
    match rates {
        Some(r) if !r.is_empty() => requested.to_string(),
        _ => {
            if requested != BASE_CURRENCY {
                tracing::info!(requested, "rates unavailable, forcing {}", BASE_CURRENCY);
            }
            BASE_CURRENCY.to_string()
        }
    }
}
