// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::Result;

pub fn handle<S: LedgerStore>(service: &mut FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let due = sub.get_one::<String>("due").unwrap().trim();
            parse_date(due)?;
            let is_loan = sub.get_flag("loan");
            let id = service.add_debt(name, amount, due, is_loan)?;
            println!(
                "Added debt #{}: {} {} (due {})",
                id,
                name,
                fmt_money(amount),
                due
            );
        }
        Some(("list", sub)) => list(service, sub)?,
        Some(("paid", sub)) => set_paid(service, sub, true)?,
        Some(("unpaid", sub)) => set_paid(service, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn set_paid<S: LedgerStore>(
    service: &mut FinanceService<S>,
    sub: &clap::ArgMatches,
    is_paid: bool,
) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    service.update_debt_status(id, is_paid)?;
    println!(
        "Debt #{} marked as {}",
        id,
        if is_paid { "paid" } else { "unpaid" }
    );
    Ok(())
}

fn list<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let debts = service.debts();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &debts)? {
        let rows = debts
            .iter()
            .map(|d| {
                vec![
                    d.id.map(|i| i.to_string()).unwrap_or_default(),
                    d.name.clone(),
                    fmt_money(d.amount),
                    d.due_date.clone(),
                    if d.is_loan { "owed to me" } else { "I owe" }.to_string(),
                    if d.is_paid { "paid" } else { "open" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Amount", "Due", "Direction", "Status"], rows)
        );
    }
    Ok(())
}
