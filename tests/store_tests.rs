// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendwise::db;
use spendwise::errors::ValidationError;
use spendwise::models::{BudgetRecord, MAX_AMOUNT, NewExpense};
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
}

#[test]
fn expenses_get_ids_and_read_back_in_date_order() {
    let conn = setup();
    let late = NewExpense::new(day(20), Decimal::new(1250, 2), "Food", Some("  lunch ")).unwrap();
    let early = NewExpense::new(day(3), Decimal::new(40, 0), "Rent", Some("")).unwrap();
    let a = db::insert_expense(&conn, &late).unwrap();
    let b = db::insert_expense(&conn, &early).unwrap();
    assert_ne!(a.id, b.id);

    let all = db::list_expenses(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].category, "Rent");
    assert_eq!(all[0].note, None);
    assert_eq!(all[1].amount, Decimal::new(1250, 2));
    assert_eq!(all[1].note.as_deref(), Some("lunch"));
}

#[test]
fn non_positive_amounts_are_rejected() {
    assert_eq!(
        NewExpense::new(day(1), Decimal::ZERO, "Food", None),
        Err(ValidationError::NonPositiveAmount("0".into()))
    );
    assert!(NewExpense::new(day(1), Decimal::new(-5, 0), "Food", None).is_err());
    assert_eq!(
        NewExpense::new(day(1), Decimal::ONE, "   ", None),
        Err(ValidationError::EmptyCategory)
    );
    assert!(BudgetRecord::new("2025-08", Decimal::ZERO, "USD").is_err());
}

#[test]
fn budget_upsert_replaces_whole_row() {
    let conn = setup();
    db::upsert_budget(&conn, &BudgetRecord::new("2025-08", Decimal::new(500, 0), "USD").unwrap())
        .unwrap();
    db::upsert_budget(&conn, &BudgetRecord::new("2025-08", Decimal::new(300, 0), "EUR").unwrap())
        .unwrap();
    db::upsert_budget(&conn, &BudgetRecord::new("2025-09", Decimal::new(800, 0), "GBP").unwrap())
        .unwrap();

    let aug = db::budget_for_month(&conn, "2025-08").unwrap().unwrap();
    assert_eq!(aug.amount, Decimal::new(300, 0));
    assert_eq!(aug.currency, "EUR");
    assert!(db::budget_for_month(&conn, "2025-07").unwrap().is_none());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM budget", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
    let all = db::list_budgets(&conn).unwrap();
    assert_eq!(all[0].month, "2025-09");
}

#[test]
fn display_currency_defaults_to_usd() {
    let conn = setup();
    assert_eq!(db::get_display_currency(&conn).unwrap(), "USD");
    db::set_display_currency(&conn, "NGN").unwrap();
    db::set_display_currency(&conn, "GBP").unwrap();
    assert_eq!(db::get_display_currency(&conn).unwrap(), "GBP");
}

#[test]
fn open_or_init_creates_file_and_is_reopenable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.sqlite");
    let path_str = path.to_string_lossy().to_string();
    {
        let conn = db::open_or_init(Some(&path_str)).unwrap();
        let e = NewExpense::new(day(5), Decimal::new(7, 0), "Bills", None).unwrap();
        db::insert_expense(&conn, &e).unwrap();
    }
    let conn = db::open_or_init(Some(&path_str)).unwrap();
    assert_eq!(db::list_expenses(&conn).unwrap().len(), 1);
}

#[test]
fn amounts_above_the_entry_limit_are_rejected() {
    let over = MAX_AMOUNT + Decimal::new(1, 2);
    assert!(matches!(
        NewExpense::new(day(1), over, "Food", None),
        Err(ValidationError::AmountTooLarge(_))
    ));
    assert!(matches!(
        BudgetRecord::new("2025-08", Decimal::MAX, "USD"),
        Err(ValidationError::AmountTooLarge(_))
    ));

    let conn = setup();
    let top = NewExpense::new(day(1), MAX_AMOUNT, "Food", None).unwrap();
    db::insert_expense(&conn, &top).unwrap();
    assert_eq!(db::list_expenses(&conn).unwrap()[0].amount, MAX_AMOUNT);
}

#[test]
fn unreadable_amount_is_refused_and_store_stays_usable() {
    let conn = setup();
    let huge = NewExpense {
        date: day(1),
        amount: Decimal::MAX,
        category: "Food".to_string(),
        note: None,
    };
    assert!(db::insert_expense(&conn, &huge).is_err());
    assert!(db::list_expenses(&conn).unwrap().is_empty());

    let budget = BudgetRecord {
        month: "2025-08".to_string(),
        amount: Decimal::MAX,
        currency: "USD".to_string(),
    };
    assert!(db::upsert_budget(&conn, &budget).is_err());
    assert!(db::list_budgets(&conn).unwrap().is_empty());
}
