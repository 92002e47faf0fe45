// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::commands::{accounts, goals};
use purse::db::SqliteStore;
use purse::models::{Account, User};
use purse::FinanceService;

fn service() -> FinanceService<SqliteStore> {
    let mut user = User::new("tester");
    user.add_account(Account::savings("Main", 500.0, 0.05));
    user.add_account(Account::new("Wallet", 25.5));
    let mut svc = FinanceService::new(user, SqliteStore::open_in_memory().unwrap()).unwrap();
    svc.set_current_account("Main").unwrap();
    svc
}

#[test]
fn balance_row_includes_all_accounts_total() {
    let svc = service();
    let row = accounts::balance_row(&svc).unwrap();
    assert_eq!(row.account, "Main");
    assert_eq!(row.kind, "savings (5.00%)");
    assert_eq!(row.balance, "500.00");
    assert_eq!(row.total_balance, "525.50");
}

#[test]
fn goal_rows_mark_reached_goals() {
    let mut svc = service();
    let car = svc.add_savings_goal("Car", 100.0).unwrap();
    svc.add_savings_goal("House", 1000.0).unwrap();
    svc.add_contribution_to_goal(car, 150.0).unwrap();

    let rows = goals::goal_rows(&svc);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "Car");
    assert_eq!(rows[0][4], "100.0%");
    assert_eq!(rows[0][5], "reached");
    assert_eq!(rows[1][5], "saving");
}
