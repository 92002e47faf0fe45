// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::db::SqliteStore;
use purse::models::{AccountKind, INCOME_CATEGORY, Transaction, User};
use purse::store::LedgerStore;
use purse::{FinanceService, cli, commands::exporter};
use serde_json::json;
use tempfile::tempdir;

fn service() -> FinanceService<SqliteStore> {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let shop = Transaction::categorized(12.34, "2025-01-02", "Corner Shop", "Groceries").unwrap();
    let pay = Transaction::categorized(900.0, "2025-01-03", "Payroll", INCOME_CATEGORY).unwrap();
    store.save_transaction("Checking", &shop, false).unwrap();
    store.save_transaction("Checking", &pay, true).unwrap();
    let mut svc = FinanceService::new(User::new("tester"), store).unwrap();
    svc.load_account("Checking", AccountKind::Standard).unwrap();
    svc.set_current_account("Checking").unwrap();
    svc
}

fn run_export(svc: &FinanceService<SqliteStore>, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "purse",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    let (_, export_m) = matches.subcommand().unwrap();
    exporter::handle(svc, export_m)
}

#[test]
fn export_transactions_writes_pretty_json() {
    let svc = service();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    run_export(&svc, "json", &out_path.to_string_lossy()).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "account": "Checking",
                "date": "2025-01-02",
                "amount": 12.34,
                "category": "Groceries",
                "description": "Corner Shop"
            },
            {
                "account": "Checking",
                "date": "2025-01-03",
                "amount": 900.0,
                "category": "Income",
                "description": "Payroll"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_with_header() {
    let svc = service();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&svc, "CSV", &out_path.to_string_lossy()).unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "account,date,amount,category,description");
    assert_eq!(lines[1], "Checking,2025-01-02,12.34,Groceries,Corner Shop");
    assert_eq!(lines[2], "Checking,2025-01-03,900.00,Income,Payroll");
}

#[test]
fn unknown_export_format_is_an_error() {
    let svc = service();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    assert!(run_export(&svc, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
