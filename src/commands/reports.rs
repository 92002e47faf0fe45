// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::report::ReportKind;
use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::Result;

pub fn handle<S: LedgerStore>(service: &FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("spending", _)) => write_report(service, ReportKind::Spending)?,
        Some(("income", _)) => write_report(service, ReportKind::Income)?,
        Some(("analysis", sub)) => analysis(service, sub)?,
        Some(("budget", sub)) => budget(service, sub)?,
        _ => {}
    }
    Ok(())
}

fn write_report<S: LedgerStore>(service: &FinanceService<S>, kind: ReportKind) -> Result<()> {
    let (text, path) = service.generate_report(kind)?;
    println!("{}", text);
    println!();
    println!("Saved to {}", path.display());
    Ok(())
}

fn analysis<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let top = service.spending_analysis()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &top)? {
        if top.is_empty() {
            println!("No spending recorded yet.");
            return Ok(());
        }
        let rows = top
            .into_iter()
            .map(|(cat, amt)| vec![cat, fmt_money(amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn budget<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().trim();
    let limit = parse_amount(sub.get_one::<String>("limit").unwrap())?;
    let status = service.budget_status(category, limit)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Status"],
                vec![vec![
                    status.category.clone(),
                    fmt_money(status.limit),
                    fmt_money(status.spent),
                    fmt_money(status.remaining),
                    if status.exceeded { "over" } else { "ok" }.to_string(),
                ]],
            )
        );
    }
    Ok(())
}
