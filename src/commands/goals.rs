// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::service::FinanceService;
use crate::store::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: LedgerStore>(service: &mut FinanceService<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
            let id = service.add_savings_goal(name, target)?;
            println!("Added goal #{}: {} (target {})", id, name, fmt_money(target));
        }
        Some(("list", sub)) => list(service, sub)?,
        Some(("contribute", sub)) => contribute(service, sub)?,
        _ => {}
    }
    Ok(())
}

fn contribute<S: LedgerStore>(service: &mut FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    service
        .add_contribution_to_goal(id, amount)
        .with_context(|| format!("Contribution to goal #{} failed", id))?;
    if let Some(goal) = service.goals().iter().find(|g| g.id() == Some(id)) {
        println!(
            "Goal '{}': {} / {} ({:.1}%)",
            goal.name(),
            fmt_money(goal.current_amount()),
            fmt_money(goal.target_amount()),
            goal.progress()
        );
    }
    Ok(())
}

fn list<S: LedgerStore>(service: &FinanceService<S>, sub: &clap::ArgMatches) -> Result<()> {
    let goals = service.goals();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Goal", "Saved", "Target", "Progress", "Status"],
                goal_rows(service)
            )
        );
    }
    Ok(())
}

pub fn goal_rows<S: LedgerStore>(service: &FinanceService<S>) -> Vec<Vec<String>> {
    service
        .goals()
        .iter()
        .map(|g| {
            vec![
                g.id().map(|i| i.to_string()).unwrap_or_default(),
                g.name().to_string(),
                fmt_money(g.current_amount()),
                fmt_money(g.target_amount()),
                format!("{:.1}%", g.progress()),
                if g.is_reached() { "reached" } else { "saving" }.to_string(),
            ]
        })
        .collect()
}
