// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending rollups against the monthly budget.
//!
//! Everything here is recomputed from scratch on each read; inputs are the
//! stored expenses (base currency), the month's budget and an optional
//! rate table.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::fx::{self, BASE_CURRENCY, RateTable};
use crate::models::{BudgetRecord, ExpenseRecord};

/// Where the user is in the set-budget, add-expenses, review flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    NeedsBudget,
    AwaitingExpenses,
    Ready,
}

impl FlowState {
    pub fn from_stores(budget: Option<&BudgetRecord>, expense_count: usize) -> Self {
        match (budget, expense_count) {
            (None, _) => FlowState::NeedsBudget,
            (Some(_), 0) => FlowState::AwaitingExpenses,
            (Some(_), _) => FlowState::Ready,
        }
    }

    pub fn next_step(&self) -> &'static str {
        match self {
            FlowState::NeedsBudget => "Set this month's budget: spendwise budget set <AMOUNT>",
            FlowState::AwaitingExpenses => {
                "Record an expense: spendwise expense add <AMOUNT> --category <NAME>"
            }
            FlowState::Ready => "Review spending: spendwise summary",
        }
    }
}

/// Sums saturate at `Decimal::MAX` instead of overflowing; entry limits keep
/// real data far below that.
fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "spending total overflowed, capping");
        if b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

pub fn total_spent(expenses: &[ExpenseRecord]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| saturating_add(acc, e.amount))
}

/// Per-category sums in the base currency, ordered by category name.
pub fn by_category(expenses: &[ExpenseRecord]) -> BTreeMap<String, Decimal> {
    let mut agg = BTreeMap::new();
    for e in expenses {
        let sum = agg.entry(e.category.clone()).or_insert(Decimal::ZERO);
        *sum = saturating_add(*sum, e.amount);
    }
    agg
}

pub fn percentage_of_total(category_amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    category_amount
        .checked_div(total)
        .and_then(|f| f.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    Within { remaining: Decimal, progress: Decimal },
    Over { overage: Decimal },
}

impl BudgetStatus {
    /// Both amounts must already be in the same currency.
    pub fn evaluate(budget: Decimal, spent: Decimal) -> Self {
        let remaining = budget.checked_sub(spent).unwrap_or(Decimal::MIN);
        if remaining < Decimal::ZERO {
            return BudgetStatus::Over {
                overage: remaining.abs(),
            };
        }
        let progress = if budget > Decimal::ZERO {
            (spent / budget).clamp(Decimal::ZERO, Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        BudgetStatus::Within {
            remaining,
            progress,
        }
    }

    pub fn progress(&self) -> Decimal {
        match self {
            BudgetStatus::Within { progress, .. } => *progress,
            BudgetStatus::Over { .. } => Decimal::ONE,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, BudgetStatus::Over { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryLine {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetView {
    pub month: String,
    pub amount: Decimal,
    pub entered_amount: Decimal,
    pub entered_currency: String,
    #[serde(flatten)]
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub state: FlowState,
    pub display_currency: String,
    pub rates_available: bool,
    pub total: Decimal,
    pub categories: Vec<CategoryLine>,
    pub budget: Option<BudgetView>,
}

/// Roll up `expenses` and compare them with `budget`, all expressed in
/// `display_currency` (or the base currency when `rates` is `None`).
///
/// The budget is compared with every expense passed in; callers decide
/// whether to restrict that set to the budget's month.
pub fn summarize(
    expenses: &[ExpenseRecord],
    budget: Option<&BudgetRecord>,
    rates: Option<&RateTable>,
    display_currency: &str,
) -> Summary {
    let display = fx::resolve_display_currency(display_currency, rates);
    let total = fx::convert(total_spent(expenses), BASE_CURRENCY, &display, rates);

    let categories = by_category(expenses)
        .into_iter()
        .map(|(category, base_amount)| {
            let amount = fx::convert(base_amount, BASE_CURRENCY, &display, rates);
            CategoryLine {
                percentage: percentage_of_total(amount, total),
                category,
                amount,
            }
        })
        .collect();

    let budget_view = budget.map(|b| {
        let amount = fx::convert(b.amount, &b.currency, &display, rates);
        BudgetView {
            month: b.month.clone(),
            amount,
            entered_amount: b.amount,
            entered_currency: b.currency.clone(),
            status: BudgetStatus::evaluate(amount, total),
        }
    });

    Summary {
        state: FlowState::from_stores(budget, expenses.len()),
        rates_available: rates.is_some_and(|r| !r.is_empty()),
        display_currency: display,
        total,
        categories,
        budget: budget_view,
    }
}
