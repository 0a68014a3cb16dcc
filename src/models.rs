// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Suggested categories. Categories are free-form tags; this is only the
/// default menu.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Rent",
    "Bills",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal, // base currency
    pub category: String,
    pub note: Option<String>,
}

/// An expense ready to be stored; `amount` is already in the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub note: Option<String>,
}

/// Largest amount accepted on entry. Keeps sums far from `Decimal` overflow
/// and every stored value exactly readable back from a REAL column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0); // 1e12

fn check_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount.to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount.to_string()));
    }
    Ok(())
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category: &str,
        note: Option<&str>,
    ) -> Result<Self, ValidationError> {
        check_amount(amount)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        Ok(Self {
            date,
            amount,
            category: category.to_string(),
            note: note
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub month: String, // YYYY-MM
    pub amount: Decimal,
    pub currency: String, // currency the amount was entered in
}

impl BudgetRecord {
    pub fn new(month: &str, amount: Decimal, currency: &str) -> Result<Self, ValidationError> {
        check_amount(amount)?;
        Ok(Self {
            month: month.to_string(),
            amount,
            currency: currency.to_string(),
        })
    }
}
