// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period_slice;
use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: LedgerStore>(service: &mut FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(service, sub)?,
        Some(("list", sub)) => list(service, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: LedgerStore>(service: &mut FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let desc = sub.get_one::<String>("desc").unwrap().trim();
    let category = sub.get_one::<String>("category").unwrap().trim();
    let is_income = sub.get_flag("income");
    if desc.is_empty() {
        anyhow::bail!("Description cannot be empty");
    }

    service.add_transaction(amount, desc, category, is_income)?;
    let acct = service.current_account()?;
    println!(
        "Recorded {} {} '{}' (acct: {}, balance: {})",
        if is_income { "income" } else { "expense" },
        fmt_money(amount),
        desc,
        acct.name(),
        fmt_money(acct.balance())
    );
    Ok(())
}

fn list<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(service, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

/// Ledger order; `--limit` keeps the most recent rows.
pub fn query_rows<S: LedgerStore>(
    service: &FinanceService<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let slice = period_slice(service, sub)?;
    let skip = match sub.get_one::<usize>("limit") {
        Some(limit) => slice.len().saturating_sub(*limit),
        None => 0,
    };
    Ok(slice
        .into_iter()
        .skip(skip)
        .map(|t| TransactionRow {
            date: t.date().to_string(),
            amount: fmt_money(t.amount()),
            category: t.category().unwrap_or_default().to_string(),
            description: t.description().to_string(),
        })
        .collect())
}
