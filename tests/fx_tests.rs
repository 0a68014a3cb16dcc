// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use spendwise::fx::{
    ConversionError, RateTable, convert, format_amount, normalize_code, resolve_display_currency,
    supported_currencies, symbol_for, try_convert,
};

fn rates(pairs: &[(&str, &str)]) -> RateTable {
    pairs
        .iter()
        .map(|(c, r)| (c.to_string(), r.parse::<Decimal>().unwrap()))
        .collect()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn usd_eur_both_directions() {
    let r = rates(&[("EUR", "0.9")]);
    assert_eq!(convert(dec("100"), "USD", "EUR", Some(&r)), dec("90.0"));
    assert_eq!(convert(dec("90"), "EUR", "USD", Some(&r)), dec("100.0"));
}

#[test]
fn no_rates_is_identity() {
    let amt = dec("123.456");
    assert_eq!(convert(amt, "EUR", "NGN", None), amt);
    assert_eq!(convert(amt, "USD", "GBP", Some(&RateTable::new())), amt);
}

#[test]
fn same_currency_is_identity() {
    let r = rates(&[("EUR", "0.9")]);
    let amt = dec("10.005");
    assert_eq!(convert(amt, "EUR", "EUR", Some(&r)), amt);
    assert_eq!(convert(amt, "XYZ", "XYZ", None), amt);
}

#[test]
fn pivots_through_usd_and_rounds() {
    let r = rates(&[("EUR", "0.90"), ("NGN", "1500")]);
    // 45 EUR -> 50 USD -> 75000 NGN
    assert_eq!(convert(dec("45"), "EUR", "NGN", Some(&r)), dec("75000"));
    // 10 USD -> 3.333.. GBP rounded to cents
    let r = rates(&[("GBP", "0.3333333")]);
    assert_eq!(convert(dec("10"), "USD", "GBP", Some(&r)), dec("3.33"));
    assert_eq!(convert(dec("1"), "GBP", "USD", Some(&r)), dec("3.00"));
}

// JPY -> USD style trips lose cents to rounding, so those pairs are left out.
#[test]
fn round_trip_stays_within_a_cent() {
    let r = rates(&[("EUR", "0.92"), ("JPY", "149.7"), ("NGN", "1530.25")]);
    for (a, b) in [("EUR", "JPY"), ("USD", "NGN"), ("USD", "EUR"), ("EUR", "NGN")] {
        let x = dec("250.40");
        let there = convert(x, a, b, Some(&r));
        let back = convert(there, b, a, Some(&r));
        assert!((back - x).abs() <= dec("0.01"), "{a}->{b}: {x} came back as {back}");
    }
}

#[test]
fn unknown_code_priced_at_one() {
    let r = rates(&[("EUR", "0.9")]);
    assert_eq!(convert(dec("40"), "USD", "ZAR", Some(&r)), dec("40"));
    assert_eq!(convert(dec("40"), "ZAR", "EUR", Some(&r)), dec("36"));
}

#[test]
fn zero_rate_fails_then_falls_back() {
    let r = rates(&[("EUR", "0")]);
    assert_eq!(
        try_convert(dec("10"), "EUR", "USD", Some(&r)),
        Err(ConversionError::DivisionByZero("EUR".into()))
    );
    assert_eq!(convert(dec("10"), "EUR", "USD", Some(&r)), dec("10"));
}

#[test]
fn symbols_fall_back_to_code() {
    assert_eq!(symbol_for("USD"), "$");
    assert_eq!(symbol_for("EUR"), "€");
    assert_eq!(symbol_for("GBP"), "£");
    assert_eq!(symbol_for("NGN"), "₦");
    assert_eq!(symbol_for("JPY"), "¥");
    assert_eq!(symbol_for("CHF"), "CHF");
    assert_eq!(format_amount(dec("9.5"), "EUR"), "€9.50");
    assert_eq!(format_amount(dec("9.5"), "CHF"), "CHF 9.50");
}

#[test]
fn supported_list_starts_with_base() {
    let list = supported_currencies();
    assert_eq!(list[0], "USD");
    for c in ["EUR", "GBP", "NGN", "JPY", "CAD", "AUD"] {
        assert!(list.contains(&c));
    }
}

#[test]
fn currency_codes_are_normalized() {
    assert_eq!(normalize_code(" eur ").unwrap(), "EUR");
    assert!(normalize_code("EURO").is_err());
    assert!(normalize_code("E1R").is_err());
}

#[test]
fn display_currency_forced_to_base_without_rates() {
    assert_eq!(resolve_display_currency("EUR", None), "USD");
    let r = rates(&[("EUR", "0.9")]);
    assert_eq!(resolve_display_currency("EUR", Some(&r)), "EUR");
}
