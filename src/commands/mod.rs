// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod transactions;
pub mod reports;
pub mod debts;
pub mod goals;
pub mod fx;
pub mod settings;
pub mod exporter;

use crate::models::Transaction;
use crate::service::FinanceService;
use crate::store::LedgerStore;
use anyhow::Result;

const OPEN_START: &str = "0001-01-01";
const OPEN_END: &str = "9999-12-31";

/// Current account transactions, optionally limited by `--from`/`--to`.
pub(crate) fn period_slice<'a, S: LedgerStore>(
    service: &'a FinanceService<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a Transaction>> {
    let account = service.current_account()?;
    let from = sub.get_one::<String>("from");
    let to = sub.get_one::<String>("to");
    if from.is_none() && to.is_none() {
        return Ok(account.transactions().iter().collect());
    }
    let from = from.map(String::as_str).unwrap_or(OPEN_START);
    let to = to.map(String::as_str).unwrap_or(OPEN_END);
    Ok(account.transactions_by_period(from, to)?)
}
