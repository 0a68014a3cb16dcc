// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Exchange-rate fetching and the persisted one-hour rate cache.
//!
//! Callers only ever see `Option<RateTable>`: every fetch failure, whatever
//! the cause, reads as "no rates".

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::fx::RateTable;
use crate::utils::http_client;

pub const DEFAULT_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest";
const FETCH_TIMEOUT_SECS: u64 = 5;

pub fn rate_ttl() -> Duration {
    Duration::hours(1)
}

#[derive(Debug, Error)]
pub enum RateFetchError {
    #[error("rate request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rate endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed rate payload: {0}")]
    Malformed(String),
    #[error("offline mode, rates not fetched")]
    Offline,
}

pub trait RateProvider {
    fn fetch_rates(&self, base: &str) -> Result<RateTable, RateFetchError>;
}

pub struct HttpRateProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRateProvider {
    pub fn new() -> Result<Self> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: http_client(FETCH_TIMEOUT_SECS)?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl RateProvider for HttpRateProvider {
    fn fetch_rates(&self, base: &str) -> Result<RateTable, RateFetchError> {
        let url = format!("{}/{}", self.endpoint, base);
        tracing::debug!(%url, "fetching exchange rates");
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RateFetchError::Status(status.as_u16()));
        }
        let body = resp.text()?;
        parse_rates(&body)
    }
}

/// Never touches the network.
pub struct OfflineRateProvider;

impl RateProvider for OfflineRateProvider {
    fn fetch_rates(&self, _base: &str) -> Result<RateTable, RateFetchError> {
        Err(RateFetchError::Offline)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

/// Parse a `{"rates": {"EUR": 0.92, ...}}` body.
pub fn parse_rates(body: &str) -> Result<RateTable, RateFetchError> {
    let payload: LatestRates =
        serde_json::from_str(body).map_err(|e| RateFetchError::Malformed(e.to_string()))?;
    let mut table = RateTable::new();
    for (code, rate) in payload.rates {
        let d = Decimal::try_from(rate).map_err(|_| {
            RateFetchError::Malformed(format!("rate {} for {} is not representable", rate, code))
        })?;
        table.insert(code.to_uppercase(), d);
    }
    Ok(table)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedRates {
    pub rates: RateTable,
    pub fetched_at: DateTime<Utc>,
}

/// A timestamp from the future (clock skew, edited DB) also counts as stale.
pub fn is_stale(now: DateTime<Utc>, fetched_at: DateTime<Utc>, ttl: Duration) -> bool {
    now < fetched_at || now.signed_duration_since(fetched_at) >= ttl
}

pub fn load_cached(conn: &Connection, base: &str) -> Result<Option<CachedRates>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT fetched_at, rates FROM rate_cache WHERE base=?1",
            params![base],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((ts, json)) = row else {
        return Ok(None);
    };
    let fetched_at = DateTime::parse_from_rfc3339(&ts)
        .with_context(|| format!("Invalid cache timestamp '{}'", ts))?
        .with_timezone(&Utc);
    let rates: RateTable = serde_json::from_str(&json)
        .with_context(|| format!("Invalid cached rate table for {}", base))?;
    Ok(Some(CachedRates { rates, fetched_at }))
}

pub fn store_cached(conn: &Connection, base: &str, cached: &CachedRates) -> Result<()> {
    conn.execute(
        "INSERT INTO rate_cache(base, fetched_at, rates) VALUES (?1, ?2, ?3)
         ON CONFLICT(base) DO UPDATE SET fetched_at=excluded.fetched_at, rates=excluded.rates",
        params![
            base,
            cached.fetched_at.to_rfc3339(),
            serde_json::to_string(&cached.rates)?
        ],
    )?;
    Ok(())
}

/// Serve the cached table while it is fresh, otherwise make one fetch
/// attempt. Returns `None` when no usable table exists.
pub fn current_rates(
    conn: &Connection,
    provider: &dyn RateProvider,
    base: &str,
    now: DateTime<Utc>,
    force_refresh: bool,
) -> Option<RateTable> {
    let cached = match load_cached(conn, base) {
        Ok(c) => c,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable rate cache");
            None
        }
    };
    if let Some(c) = cached {
        if !force_refresh && !is_stale(now, c.fetched_at, rate_ttl()) {
            tracing::debug!(fetched_at = %c.fetched_at, "using cached rates");
            return Some(c.rates).filter(|r| !r.is_empty());
        }
    }

    match provider.fetch_rates(base) {
        Ok(rates) if rates.is_empty() => {
            tracing::warn!("rate provider returned an empty table");
            None
        }
        Ok(rates) => {
            tracing::info!(count = rates.len(), base, "fetched exchange rates");
            let fresh = CachedRates {
                rates,
                fetched_at: now,
            };
            if let Err(err) = store_cached(conn, base, &fresh) {
                tracing::warn!(error = %err, "could not persist rate cache");
            }
            Some(fresh.rates)
        }
        Err(err) => {
            tracing::warn!(error = %err, "exchange rates unavailable");
            None
        }
    }
}
