// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_slice;
use crate::models::AccountKind;
use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: LedgerStore>(service: &mut FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(service, sub)?,
        Some(("history", sub)) => history(service, sub)?,
        Some(("interest", _)) => {
            let amount = service.apply_interest()?;
            let acct = service.current_account()?;
            println!(
                "Interest of {} booked on '{}'; balance is now {}",
                fmt_money(amount),
                acct.name(),
                fmt_money(acct.balance())
            );
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BalanceRow {
    pub account: String,
    pub kind: String,
    pub balance: String,
    pub transactions: usize,
    /// Sum over every account loaded for the user.
    pub total_balance: String,
}

pub fn balance_row<S: LedgerStore>(service: &FinanceService<S>) -> Result<BalanceRow> {
    let acct = service.current_account()?;
    let kind = match acct.kind() {
        AccountKind::Standard => "standard".to_string(),
        AccountKind::Savings { interest_rate } => format!("savings ({:.2}%)", interest_rate * 100.0),
    };
    Ok(BalanceRow {
        account: acct.name().to_string(),
        kind,
        balance: fmt_money(acct.balance()),
        transactions: acct.transactions().len(),
        total_balance: fmt_money(service.user().total_balance()),
    })
}

fn balance<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let row = balance_row(service)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        println!(
            "{}",
            pretty_table(
                &["Account", "Kind", "Balance", "Transactions", "All accounts"],
                vec![vec![
                    row.account,
                    row.kind,
                    row.balance,
                    row.transactions.to_string(),
                    row.total_balance,
                ]],
            )
        );
    }
    Ok(())
}

fn history<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let slice = period_slice(service, sub)?;
    let rows: Vec<String> = slice.iter().rev().map(|t| t.display()).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slice)? {
        if rows.is_empty() {
            println!("No transactions.");
        }
        for r in rows {
            println!("{}", r);
        }
    }
    Ok(())
}
