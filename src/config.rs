// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::fx::is_currency_code;
use crate::models::DEFAULT_INTEREST_RATE;
use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

pub const USER_NAME: &str = "user_name";
pub const DEFAULT_ACCOUNT: &str = "default_account";
pub const INTEREST_RATE: &str = "interest_rate";
pub const BASE_CURRENCY: &str = "base_currency";
pub const REPORT_DIR: &str = "report_dir";

pub const KEYS: &[&str] = &[USER_NAME, DEFAULT_ACCOUNT, INTEREST_RATE, BASE_CURRENCY, REPORT_DIR];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub user_name: String,
    pub default_account: String,
    pub interest_rate: f64,
    pub base_currency: String,
    pub report_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: "DefaultUser".into(),
            default_account: "Main".into(),
            interest_rate: DEFAULT_INTEREST_RATE,
            base_currency: "UAH".into(),
            report_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Reads the settings table, falling back to defaults for missing keys.
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = get(conn, USER_NAME)? {
            cfg.user_name = v;
        }
        if let Some(v) = get(conn, DEFAULT_ACCOUNT)? {
            cfg.default_account = v;
        }
        if let Some(v) = get(conn, INTEREST_RATE)? {
            cfg.interest_rate = parse_rate(&v)?;
        }
        if let Some(v) = get(conn, BASE_CURRENCY)? {
            cfg.base_currency = v;
        }
        if let Some(v) = get(conn, REPORT_DIR)? {
            cfg.report_dir = PathBuf::from(v);
        }
        Ok(cfg)
    }
}

fn parse_rate(s: &str) -> Result<f64> {
    let r: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid interest rate '{}'", s))?;
    if !r.is_finite() || r < 0.0 {
        bail!("Interest rate must be a non-negative number, got {}", s);
    }
    Ok(r)
}

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

/// Validates and upserts a known setting.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        INTEREST_RATE => {
            parse_rate(value)?;
        }
        BASE_CURRENCY => {
            if !is_currency_code(value) {
                bail!("Invalid currency code '{}', expected e.g. USD", value);
            }
        }
        USER_NAME | DEFAULT_ACCOUNT | REPORT_DIR => {
            if value.is_empty() {
                bail!("Setting '{}' cannot be empty", key);
            }
        }
        _ => bail!("Unknown setting '{}' (known: {})", key, KEYS.join(", ")),
    }
    let value = if key == BASE_CURRENCY {
        value.to_uppercase()
    } else {
        value.to_string()
    };
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
