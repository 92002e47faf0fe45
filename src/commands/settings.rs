// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let cfg = Config::load(conn)?;
            let rows = vec![
                vec![config::USER_NAME.to_string(), cfg.user_name],
                vec![config::DEFAULT_ACCOUNT.to_string(), cfg.default_account],
                vec![config::INTEREST_RATE.to_string(), cfg.interest_rate.to_string()],
                vec![config::BASE_CURRENCY.to_string(), cfg.base_currency],
                vec![
                    config::REPORT_DIR.to_string(),
                    cfg.report_dir.display().to_string(),
                ],
            ];
            let rows: Vec<Vec<String>> = match sub.get_one::<String>("key") {
                Some(key) => rows.into_iter().filter(|r| &r[0] == key).collect(),
                None => rows,
            };
            if rows.is_empty() {
                anyhow::bail!("Unknown setting (known: {})", config::KEYS.join(", "));
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap();
            config::set(conn, key, value)?;
            println!("{} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
