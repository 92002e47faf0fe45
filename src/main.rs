// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use purse::config::Config;
use purse::db::{self, SqliteStore};
use purse::models::{AccountKind, User};
use purse::{FinanceService, cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("config", sub)) => return commands::settings::handle(&conn, sub),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        _ => {}
    }

    let cfg = Config::load(&conn)?;
    let account = matches
        .get_one::<String>("account")
        .cloned()
        .unwrap_or_else(|| cfg.default_account.clone());

    let store = SqliteStore::new(conn)?;
    let mut service =
        FinanceService::new(User::new(&cfg.user_name), store)?.with_report_dir(&cfg.report_dir);
    service.load_account(
        &account,
        AccountKind::Savings {
            interest_rate: cfg.interest_rate,
        },
    )?;
    service.set_current_account(&account)?;

    match matches.subcommand() {
        Some(("account", sub)) => commands::accounts::handle(&mut service, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut service, sub)?,
        Some(("report", sub)) => commands::reports::handle(&service, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&mut service, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut service, sub)?,
        Some(("fx", sub)) => commands::fx::handle(service.store().conn(), sub)?,
        Some(("export", sub)) => commands::exporter::handle(&service, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
