// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

use crate::db::list_expenses;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let expenses = list_expenses(conn)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "amount", "category", "note"])?;
            for e in &expenses {
                wtr.write_record([
                    e.id.to_string(),
                    e.date.to_string(),
                    format!("{:.2}", e.amount),
                    e.category.clone(),
                    e.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = expenses
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id, "date": e.date.to_string(), "amount": format!("{:.2}", e.amount),
                        "category": e.category, "note": e.note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} expenses to {}", expenses.len(), out);
    Ok(())
}
