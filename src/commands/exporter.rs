// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::fmt_money;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle<S: LedgerStore>(service: &FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(service, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: LedgerStore>(
    service: &FinanceService<S>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let account = service.current_account()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["account", "date", "amount", "category", "description"])?;
            for t in account.transactions() {
                let amount = fmt_money(t.amount());
                wtr.write_record([
                    account.name(),
                    t.date(),
                    amount.as_str(),
                    t.category().unwrap_or_default(),
                    t.description(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = account
                .transactions()
                .iter()
                .map(|t| {
                    json!({
                        "account": account.name(),
                        "date": t.date(),
                        "amount": t.amount(),
                        "category": t.category(),
                        "description": t.description(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
