// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{fmt_date, http_client};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::collections::HashMap;

pub const API_KEY_ENV: &str = "EXCHANGERATE_API_KEY";
const API_ROOT: &str = "https://v6.exchangerate-api.com/v6";

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("currency code pattern"));

pub fn is_currency_code(s: &str) -> bool {
    CODE_RE.is_match(s)
}

/// Converts between currencies. `None` is a soft failure: callers show a
/// message instead of raising.
pub trait CurrencyConverter {
    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64>;
}

#[derive(Debug, Deserialize)]
struct Latest {
    result: String,
    #[serde(default)]
    conversion_rates: HashMap<String, f64>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

/// exchangerate-api.com client. Rates fetched on a given day are cached in
/// `fx_rates` when a connection is attached.
pub struct ExchangeRateApi<'c> {
    client: reqwest::blocking::Client,
    base_url: String,
    cache: Option<&'c Connection>,
}

impl<'c> ExchangeRateApi<'c> {
    pub fn new(api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("Empty exchange rate API key");
        }
        Ok(Self {
            client: http_client()?,
            base_url: format!("{}/{}/latest/", API_ROOT, api_key.trim()),
            cache: None,
        })
    }

    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV)
            .with_context(|| format!("{} is not set", API_KEY_ENV))?;
        Self::new(&key)
    }

    pub fn with_cache(mut self, conn: &'c Connection) -> Self {
        self.cache = Some(conn);
        self
    }

    /// 1 `base` = rate `quote`, for today.
    pub fn rate(&self, base: &str, quote: &str) -> Result<Decimal> {
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();
        for c in [&base, &quote] {
            if !is_currency_code(c) {
                bail!("Invalid currency code '{}'", c);
            }
        }
        let today = Local::now().date_naive();
        if let Some(conn) = self.cache {
            if let Some(r) = cached_rate(conn, today, &base, &quote)? {
                return Ok(r);
            }
        }

        let url = format!("{}{}", self.base_url, base);
        tracing::info!(%base, "requesting exchange rates");
        let resp = self.client.get(url).send()?.error_for_status()?;
        let latest: Latest = resp.json()?;
        if latest.result != "success" {
            bail!(
                "Exchange rate API error: {}",
                latest.error_type.as_deref().unwrap_or("unknown")
            );
        }
        if let Some(conn) = self.cache {
            store_rates(conn, today, &base, &latest.conversion_rates)?;
        }
        let r = latest
            .conversion_rates
            .get(&quote)
            .copied()
            .ok_or_else(|| anyhow!("No rate for {}/{}", base, quote))?;
        Decimal::try_from(r).with_context(|| format!("Invalid rate '{}' for {}/{}", r, base, quote))
    }
}

impl CurrencyConverter for ExchangeRateApi<'_> {
    fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        if !is_currency_code(from) || !is_currency_code(to) {
            tracing::warn!(%from, %to, "invalid currency code");
            return None;
        }
        if from.eq_ignore_ascii_case(to) {
            return Some(amount);
        }
        let rate = match self.rate(from, to) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%from, %to, error = %e, "currency conversion failed");
                return None;
            }
        };
        let amount = Decimal::try_from(amount).ok()?;
        amount.checked_mul(rate)?.to_f64()
    }
}

pub fn cached_rate(
    conn: &Connection,
    date: NaiveDate,
    base: &str,
    quote: &str,
) -> Result<Option<Decimal>> {
    let r: Option<String> = conn
        .query_row(
            "SELECT rate FROM fx_rates WHERE date=?1 AND base=?2 AND quote=?3",
            params![fmt_date(date), base, quote],
            |r| r.get(0),
        )
        .optional()?;
    match r {
        Some(s) => {
            let d = s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid rate '{}' for {}/{}", s, base, quote))?;
            Ok(Some(d))
        }
        None => Ok(None),
    }
}

pub fn store_rates(
    conn: &Connection,
    date: NaiveDate,
    base: &str,
    rates: &HashMap<String, f64>,
) -> Result<()> {
    let day = fmt_date(date);
    for (quote, rate) in rates {
        conn.execute(
            "INSERT OR IGNORE INTO fx_rates(date, base, quote, rate) VALUES (?1, ?2, ?3, ?4)",
            params![day, base, quote, rate.to_string()],
        )?;
    }
    Ok(())
}
