// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::db::SqliteStore;
use purse::models::{AccountKind, Transaction, User};
use purse::store::LedgerStore;
use purse::{FinanceService, cli, commands::transactions};

fn setup() -> FinanceService<SqliteStore> {
    let mut store = SqliteStore::open_in_memory().unwrap();
    for i in 1..=3 {
        let t = Transaction::categorized(10.0, format!("2025-01-0{}", i), "P", "Cat1").unwrap();
        store.save_transaction("A1", &t, false).unwrap();
    }
    let mut service = FinanceService::new(User::new("tester"), store).unwrap();
    service.load_account("A1", AccountKind::Standard).unwrap();
    service.set_current_account("A1").unwrap();
    service
}

fn list_rows(service: &FinanceService<SqliteStore>, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let argv = ["purse", "tx", "list"].iter().chain(args.iter()).copied();
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(service, list_m).unwrap();
        }
        panic!("no list subcommand");
    }
    panic!("no tx subcommand");
}

#[test]
fn list_limit_keeps_latest_rows() {
    let service = setup();
    let rows = list_rows(&service, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-02");
    assert_eq!(rows[1].date, "2025-01-03");
    assert_eq!(rows[1].amount, "10.00");
    assert_eq!(rows[1].category, "Cat1");
}

#[test]
fn list_period_is_inclusive() {
    let service = setup();
    let rows = list_rows(&service, &["--from", "2025-01-02", "--to", "2025-01-03"]);
    assert_eq!(rows.len(), 2);

    let rows = list_rows(&service, &["--to", "2025-01-01"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].date, "2025-01-01");
}

#[test]
fn list_rejects_malformed_bounds() {
    let service = setup();
    let matches = cli::build_cli().get_matches_from(["purse", "tx", "list", "--from", "01/02/2025"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&service, list_m).is_err());
}

#[test]
fn add_records_against_current_account() {
    let mut service = setup();
    let matches = cli::build_cli().get_matches_from([
        "purse", "tx", "add", "--amount", "250", "--desc", "Bonus", "--income",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    transactions::handle(&mut service, tx_m).unwrap();

    let acct = service.current_account().unwrap();
    assert_eq!(acct.balance(), 220.0);
    assert_eq!(acct.transactions().last().unwrap().category(), Some("Income"));

    let matches = cli::build_cli().get_matches_from([
        "purse", "tx", "add", "--amount", "5", "--desc", "   ",
    ]);
    let (_, tx_m) = matches.subcommand().unwrap();
    assert!(transactions::handle(&mut service, tx_m).is_err());
    assert_eq!(service.current_account().unwrap().transactions().len(), 4);
}

#[test]
fn global_account_flag_parses_after_subcommand() {
    let matches = cli::build_cli().get_matches_from(["purse", "tx", "list", "--account", "Savings"]);
    assert_eq!(
        matches.get_one::<String>("account").map(String::as_str),
        Some("Savings")
    );
}
