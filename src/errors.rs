// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub use crate::fx::ConversionError;
pub use crate::rates::RateFetchError;

/// Input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(String),
    #[error("amount {0} is too large, the limit is 1000000000000")]
    AmountTooLarge(String),
    #[error("{amount} {currency} is less than one cent in USD")]
    RoundsToZero { amount: String, currency: String },
    #[error("invalid currency code '{0}', expected three letters like USD")]
    InvalidCurrency(String),
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("category must not be empty")]
    EmptyCategory,
}
