// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::fx::{CurrencyConverter, ExchangeRateApi};
use crate::utils::parse_amount;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("convert", sub)) => {
            let base = Config::load(conn)?.base_currency;
            // A missing key or failed lookup is reported, not raised.
            let line = match ExchangeRateApi::from_env() {
                Ok(api) => convert_line(&api.with_cache(conn), sub, &base)?,
                Err(e) => format!("Currency conversion unavailable: {:#}", e),
            };
            println!("{}", line);
        }
        _ => {}
    }
    Ok(())
}

/// Without `--to` the amount is converted into `base_currency`.
pub fn convert_line(
    conv: &dyn CurrencyConverter,
    sub: &clap::ArgMatches,
    base_currency: &str,
) -> Result<String> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let from = sub.get_one::<String>("from").unwrap().trim().to_uppercase();
    let to = sub
        .get_one::<String>("to")
        .map(String::as_str)
        .unwrap_or(base_currency)
        .trim()
        .to_uppercase();
    Ok(match conv.convert(amount, &from, &to) {
        Some(v) => format!("{:.2} {} -> {:.2} {}", amount, from, v, to),
        None => format!("Could not get the {}/{} exchange rate.", from, to),
    })
}
