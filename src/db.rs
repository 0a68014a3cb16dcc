// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fs;
use std::path::PathBuf;

use crate::fx::BASE_CURRENCY;
use crate::models::{BudgetRecord, ExpenseRecord, NewExpense};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("spendwise.sqlite"))
}

/// Open the database at `path_override`, or the platform default, creating
/// tables as needed.
pub fn open_or_init(path_override: Option<&str>) -> Result<Connection> {
    let path = match path_override {
        Some(p) => PathBuf::from(p),
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT,
        amount REAL, -- stored in BASE currency
        category TEXT,
        note TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS budget(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        month TEXT UNIQUE,
        amount REAL, -- in `currency`, not converted
        currency TEXT
    );

    CREATE TABLE IF NOT EXISTS rate_cache(
        base TEXT PRIMARY KEY,
        fetched_at TEXT NOT NULL,
        rates TEXT NOT NULL
    );
    "#,
    )
    .context("Failed to create schema")?;
    Ok(())
}

// Display currency setting
pub fn get_display_currency(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='display_currency'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| BASE_CURRENCY.to_string()))
}

pub fn set_display_currency(conn: &Connection, ccy: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('display_currency', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![ccy],
    )?;
    Ok(())
}

/// Refuses any amount whose REAL form would not read back as a `Decimal`.
fn to_real(amount: Decimal) -> Result<f64> {
    let v = amount
        .to_f64()
        .ok_or_else(|| anyhow!("Amount {} cannot be stored", amount))?;
    if Decimal::try_from(v).is_err() {
        bail!("Amount {} cannot be stored", amount);
    }
    Ok(v)
}

fn from_real(v: f64, what: &str) -> Result<Decimal> {
    Decimal::try_from(v).with_context(|| format!("Invalid amount '{}' in {}", v, what))
}

// Expense store: append-only.
pub fn insert_expense(conn: &Connection, e: &NewExpense) -> Result<ExpenseRecord> {
    conn.execute(
        "INSERT INTO expenses(date, amount, category, note) VALUES (?1, ?2, ?3, ?4)",
        params![e.date.to_string(), to_real(e.amount)?, e.category, e.note],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(id, amount = %e.amount, category = %e.category, "expense recorded");
    Ok(ExpenseRecord {
        id,
        date: e.date,
        amount: e.amount,
        category: e.category.clone(),
        note: e.note.clone(),
    })
}

pub fn list_expenses(conn: &Connection) -> Result<Vec<ExpenseRecord>> {
    let mut stmt =
        conn.prepare("SELECT id, date, amount, category, note FROM expenses ORDER BY date, id")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, f64>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, d, amt, category, note) = row?;
        let date = NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' on expense {}", d, id))?;
        out.push(ExpenseRecord {
            id,
            date,
            amount: from_real(amt, "expenses")?,
            category: category.unwrap_or_else(|| "Other".to_string()),
            note: note.filter(|n| !n.is_empty()),
        });
    }
    Ok(out)
}

// Budget store: one row per month, replaced wholesale on save.
pub fn upsert_budget(conn: &Connection, b: &BudgetRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO budget(month, amount, currency) VALUES (?1, ?2, ?3)
         ON CONFLICT(month) DO UPDATE SET amount=excluded.amount, currency=excluded.currency",
        params![b.month, to_real(b.amount)?, b.currency],
    )?;
    tracing::info!(month = %b.month, amount = %b.amount, currency = %b.currency, "budget saved");
    Ok(())
}

pub fn budget_for_month(conn: &Connection, month: &str) -> Result<Option<BudgetRecord>> {
    let row: Option<(String, f64, String)> = conn
        .query_row(
            "SELECT month, amount, currency FROM budget WHERE month=?1",
            params![month],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;
    match row {
        Some((month, amt, currency)) => Ok(Some(BudgetRecord {
            amount: from_real(amt, "budget")?,
            month,
            currency,
        })),
        None => Ok(None),
    }
}

pub fn list_budgets(conn: &Connection) -> Result<Vec<BudgetRecord>> {
    let mut stmt = conn.prepare("SELECT month, amount, currency FROM budget ORDER BY month DESC")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, f64>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (month, amt, currency) = row?;
        out.push(BudgetRecord {
            amount: from_real(amt, "budget")?,
            month,
            currency,
        });
    }
    Ok(out)
}
