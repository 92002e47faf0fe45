// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use purse::db::{SqliteStore, open_at};
use purse::models::{Debt, INCOME_CATEGORY, SavingsGoal, Transaction};
use purse::store::{LedgerStore, StoreError};
use rusqlite::params;
use tempfile::tempdir;

#[test]
fn transactions_replay_into_a_balance() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let pay = Transaction::categorized(1200.0, "2025-01-01", "Salary", INCOME_CATEGORY).unwrap();
    let rent = Transaction::categorized(800.0, "2025-01-02", "Rent", "Housing").unwrap();
    let note = Transaction::new(15.5, "2025-01-03", "Uncategorized").unwrap();
    store.save_transaction("Main", &pay, true).unwrap();
    store.save_transaction("Main", &rent, false).unwrap();
    store.save_transaction("Main", &note, false).unwrap();
    store.save_transaction("Side", &pay, true).unwrap();

    let (rows, balance) = store.load_transactions_for_account("Main").unwrap();
    assert_eq!(rows, vec![pay, rent, note]);
    assert_eq!(balance, 384.5);
    assert_eq!(rows[2].category(), None);

    let (rows, balance) = store.load_transactions_for_account("Nobody").unwrap();
    assert!(rows.is_empty());
    assert_eq!(balance, 0.0);
}

#[test]
fn bad_rows_surface_as_corrupt() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .conn()
        .execute(
            "INSERT INTO transactions(account_name, amount, date, description, category, is_income)
             VALUES ('Main', -3.0, '2025-01-01', 'Broken', NULL, 0)",
            [],
        )
        .unwrap();
    match store.load_transactions_for_account("Main") {
        Err(StoreError::Corrupt { table, .. }) => assert_eq!(table, "transactions"),
        other => panic!("expected corrupt row, got {other:?}"),
    }
}

#[test]
fn debts_round_trip_with_fresh_ids() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let a = store
        .save_debt(&Debt::new("Alice", 100.0, "2025-04-01", true).unwrap())
        .unwrap();
    let b = store
        .save_debt(&Debt::new("Bank", 2500.0, "2025-12-31", false).unwrap())
        .unwrap();
    assert!(b > a);

    let mut debts = store.load_debts().unwrap();
    assert_eq!(debts.len(), 2);
    assert_eq!(debts[0].id, Some(a));
    assert!(debts[0].is_loan && !debts[1].is_loan);

    debts[1].mark_as_paid();
    store.update_debt(&debts[1]).unwrap();
    let reloaded = store.load_debts().unwrap();
    assert!(!reloaded[0].is_paid);
    assert!(reloaded[1].is_paid);
}

#[test]
fn updating_unsaved_records_is_refused() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let debt = Debt::new("Carol", 5.0, "2025-01-01", true).unwrap();
    assert!(matches!(store.update_debt(&debt), Err(StoreError::Unsaved(_))));
    let goal = SavingsGoal::new("Bike", 300.0).unwrap();
    assert!(matches!(store.update_goal(&goal), Err(StoreError::Unsaved(_))));
}

#[test]
fn goals_keep_progress_across_reloads() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let id = store.save_goal(&SavingsGoal::new("Laptop", 1500.0).unwrap()).unwrap();

    let mut goal = store.load_goals().unwrap().remove(0);
    assert_eq!(goal.id(), Some(id));
    goal.add_contribution(600.0).unwrap();
    store.update_goal(&goal).unwrap();

    let goal = store.load_goals().unwrap().remove(0);
    assert_eq!(goal.current_amount(), 600.0);
    assert_eq!(goal.progress(), 40.0);
}

#[test]
fn stored_progress_above_target_is_clamped_on_load() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .conn()
        .execute(
            "INSERT INTO goals(name, target_amount, current_amount) VALUES (?1, ?2, ?3)",
            params!["Trip", 100.0, 250.0],
        )
        .unwrap();
    let goals = store.load_goals().unwrap();
    assert_eq!(goals[0].current_amount(), 100.0);
    assert!(goals[0].is_reached());
}

#[test]
fn file_database_persists_between_opens() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("purse.sqlite");
    {
        let mut store = SqliteStore::new(open_at(&path).unwrap()).unwrap();
        let t = Transaction::categorized(42.0, "2025-03-03", "Book", "Education").unwrap();
        store.save_transaction("Main", &t, false).unwrap();
    }
    let store = SqliteStore::new(open_at(&path).unwrap()).unwrap();
    let (rows, balance) = store.load_transactions_for_account("Main").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(balance, -42.0);
}
