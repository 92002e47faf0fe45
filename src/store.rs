// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Storage contract the finance service writes through.
//!
//! The store is append/update only: nothing is ever deleted, and once the
//! service has loaded debts and goals its in-memory copies are authoritative
//! for reads. Every call is blocking and is not retried.

use crate::models::{Debt, SavingsGoal, Transaction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt row {row} in '{table}': {detail}")]
    Corrupt {
        table: &'static str,
        row: i64,
        detail: String,
    },

    /// Update of a record that was never saved.
    #[error("{0} has no identity; save it before updating")]
    Unsaved(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait LedgerStore {
    fn save_transaction(
        &mut self,
        account_name: &str,
        transaction: &Transaction,
        is_income: bool,
    ) -> StoreResult<()>;

    /// Rows in storage order, plus the balance obtained by replaying them
    /// (+amount for income rows, -amount otherwise).
    fn load_transactions_for_account(
        &self,
        account_name: &str,
    ) -> StoreResult<(Vec<Transaction>, f64)>;

    /// Inserts and returns the identity assigned by the store.
    fn save_debt(&mut self, debt: &Debt) -> StoreResult<i64>;
    fn update_debt(&mut self, debt: &Debt) -> StoreResult<()>;
    fn load_debts(&self) -> StoreResult<Vec<Debt>>;

    fn save_goal(&mut self, goal: &SavingsGoal) -> StoreResult<i64>;
    fn update_goal(&mut self, goal: &SavingsGoal) -> StoreResult<()>;
    fn load_goals(&self) -> StoreResult<Vec<SavingsGoal>>;
}
