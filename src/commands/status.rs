// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::budgets::month_or_current;
use crate::db::{budget_for_month, list_expenses};
use crate::summary::FlowState;

pub fn flow_state(conn: &Connection, month: &str) -> Result<FlowState> {
    let budget = budget_for_month(conn, month)?;
    let count = list_expenses(conn)?.len();
    Ok(FlowState::from_stores(budget.as_ref(), count))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let state = flow_state(conn, &month)?;
    let label = match state {
        FlowState::NeedsBudget => "needs budget",
        FlowState::AwaitingExpenses => "awaiting expenses",
        FlowState::Ready => "ready",
    };
    println!("{}: {}", month, label);
    println!("Next: {}", state.next_step());
    Ok(())
}
