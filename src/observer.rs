// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Events the finance service reports about itself, and sinks for them.

use crate::report::ReportKind;
use std::cell::RefCell;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum FinanceEvent {
    Started { debts: usize, goals: usize },
    AccountLoaded { account: String, transactions: usize, balance: f64 },
    AccountSelected { account: String },
    TransactionRecorded {
        account: String,
        amount: f64,
        category: String,
        is_income: bool,
    },
    InterestApplied { account: String, amount: f64 },
    /// In-memory state was kept; only the write failed.
    PersistFailed { what: &'static str, error: String },
    ReportWritten { kind: ReportKind, path: PathBuf },
    ReportFailed { kind: ReportKind, path: PathBuf, error: String },
    DebtAdded { id: i64, name: String, amount: f64 },
    DebtStatusChanged { id: i64, is_paid: bool },
    GoalAdded { id: i64, name: String, target: f64 },
    ContributionRecorded { goal_id: i64, amount: f64, progress: f64 },
    Rejected { operation: &'static str, reason: String },
}

pub trait Observer {
    fn notify(&self, event: &FinanceEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &FinanceEvent) {
        use FinanceEvent::*;
        match event {
            Started { debts, goals } => {
                tracing::info!(debts, goals, "finance service started")
            }
            AccountLoaded {
                account,
                transactions,
                balance,
            } => tracing::info!(%account, transactions, balance, "account loaded"),
            AccountSelected { account } => tracing::info!(%account, "current account set"),
            TransactionRecorded {
                account,
                amount,
                category,
                is_income,
            } => tracing::info!(%account, amount, %category, is_income, "transaction recorded"),
            InterestApplied { account, amount } => {
                tracing::info!(%account, amount, "interest applied")
            }
            PersistFailed { what, error } => {
                tracing::error!(what, %error, "persistence failed; in-memory state kept")
            }
            ReportWritten { kind, path } => {
                tracing::info!(?kind, path = %path.display(), "report written")
            }
            ReportFailed { kind, path, error } => {
                tracing::error!(?kind, path = %path.display(), %error, "report write failed")
            }
            DebtAdded { id, name, amount } => tracing::info!(id, %name, amount, "debt added"),
            DebtStatusChanged { id, is_paid } => {
                tracing::info!(id, is_paid, "debt status updated")
            }
            GoalAdded { id, name, target } => tracing::info!(id, %name, target, "goal added"),
            ContributionRecorded {
                goal_id,
                amount,
                progress,
            } => tracing::info!(goal_id, amount, progress, "goal contribution recorded"),
            Rejected { operation, reason } => tracing::warn!(operation, %reason, "rejected"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn notify(&self, _event: &FinanceEvent) {}
}

/// Keeps every event; meant for tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<FinanceEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<FinanceEvent> {
        self.events.borrow().clone()
    }
}

impl Observer for RecordingObserver {
    fn notify(&self, event: &FinanceEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

impl<O: Observer + ?Sized> Observer for std::rc::Rc<O> {
    fn notify(&self, event: &FinanceEvent) {
        (**self).notify(event)
    }
}
