// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Finance service: the one place where accounts, debts, goals and the store
//! meet.
//!
//! Debts and goals are loaded once at construction and kept as a write-through
//! cache: every change is applied in memory first and then pushed to the store.
//! The cache is authoritative for reads and the store is never re-queried. A
//! failed write is reported to the caller but does not undo the in-memory
//! change.
//!
//! Until [`FinanceService::set_current_account`] succeeds the service is
//! uninitialized and every account, debt and goal operation fails with
//! [`FinanceError::InvalidState`].

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Account, AccountKind, BudgetStatus, Budget, Debt, INCOME_CATEGORY, SAVINGS_CATEGORY,
    SavingsGoal, Transaction, User, ensure_positive,
};
use crate::observer::{FinanceEvent, Observer, TracingObserver};
use crate::report::{Report, ReportKind};
use crate::store::{LedgerStore, StoreResult};
use crate::utils::{fmt_date, month_start};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

/// How many categories [`FinanceService::spending_analysis`] returns.
pub const TOP_CATEGORIES: usize = 5;

pub struct FinanceService<S: LedgerStore> {
    user: User,
    store: S,
    observer: Box<dyn Observer>,
    clock: Box<dyn Fn() -> NaiveDate>,
    report_dir: PathBuf,
    current_account: Option<String>,
    debts: Vec<Debt>,
    goals: Vec<SavingsGoal>,
}

impl<S: LedgerStore> FinanceService<S> {
    pub fn new(user: User, store: S) -> FinanceResult<Self> {
        Self::with_observer(user, store, Box::new(TracingObserver))
    }

    pub fn with_observer(user: User, store: S, observer: Box<dyn Observer>) -> FinanceResult<Self> {
        let debts = store.load_debts()?;
        let goals = store.load_goals()?;
        observer.notify(&FinanceEvent::Started {
            debts: debts.len(),
            goals: goals.len(),
        });
        Ok(Self {
            user,
            store,
            observer,
            clock: Box::new(|| Local::now().date_naive()),
            report_dir: PathBuf::from("."),
            current_account: None,
            debts,
            goals,
        })
    }

    /// Replaces the source of "today" used for transaction dates and report periods.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Directory report files are written to; the working directory by default.
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    fn notify(&self, event: FinanceEvent) {
        self.observer.notify(&event);
    }

    fn reject(&self, operation: &'static str, err: FinanceError) -> FinanceError {
        self.notify(FinanceEvent::Rejected {
            operation,
            reason: err.to_string(),
        });
        err
    }

    fn check_persist<T>(&self, what: &'static str, result: StoreResult<T>) -> FinanceResult<T> {
        result.map_err(|e| {
            self.notify(FinanceEvent::PersistFailed {
                what,
                error: e.to_string(),
            });
            FinanceError::Storage(e)
        })
    }

    fn active_name(&self) -> FinanceResult<&str> {
        self.current_account
            .as_deref()
            .ok_or_else(|| FinanceError::InvalidState("No current account has been set".into()))
    }

    /// Rebuilds `name` from its stored history and registers it with the user,
    /// replacing any in-memory account of the same name.
    pub fn load_account(&mut self, name: &str, kind: AccountKind) -> FinanceResult<()> {
        let (transactions, balance) = self.store.load_transactions_for_account(name)?;
        let count = transactions.len();
        self.user
            .add_account(Account::restore(name, kind, transactions, balance));
        self.notify(FinanceEvent::AccountLoaded {
            account: name.to_string(),
            transactions: count,
            balance,
        });
        Ok(())
    }

    pub fn set_current_account(&mut self, name: &str) -> FinanceResult<()> {
        if !self.user.has_account(name) {
            return Err(self.reject(
                "set_current_account",
                FinanceError::account_not_found(name),
            ));
        }
        self.current_account = Some(name.to_string());
        self.notify(FinanceEvent::AccountSelected {
            account: name.to_string(),
        });
        Ok(())
    }

    pub fn current_account(&self) -> FinanceResult<&Account> {
        let name = self.active_name()?;
        self.user
            .account(name)
            .ok_or_else(|| FinanceError::account_not_found(name))
    }

    /// Records a transaction dated today on the current account and appends it
    /// to the store. Income is always filed under the income category,
    /// whatever `category` says.
    pub fn add_transaction(
        &mut self,
        amount: f64,
        description: &str,
        category: &str,
        is_income: bool,
    ) -> FinanceResult<()> {
        let name = self.active_name()?.to_string();
        let category = if is_income { INCOME_CATEGORY } else { category };
        let date = fmt_date(self.today());
        let transaction = Transaction::categorized(amount, date, description, category)?;

        let Some(account) = self.user.account_mut(&name) else {
            return Err(FinanceError::account_not_found(name));
        };
        if let Err(e) = account.add_transaction(transaction.clone(), is_income) {
            return Err(self.reject("add_transaction", e));
        }
        self.notify(FinanceEvent::TransactionRecorded {
            account: name.clone(),
            amount,
            category: category.to_string(),
            is_income,
        });

        let result = self.store.save_transaction(&name, &transaction, is_income);
        self.check_persist("transaction", result)
    }

    /// Books interest on the current savings account and returns the amount.
    pub fn apply_interest(&mut self) -> FinanceResult<f64> {
        let name = self.active_name()?.to_string();
        let today = self.today();
        let Some(account) = self.user.account_mut(&name) else {
            return Err(FinanceError::account_not_found(name));
        };
        let transaction = match account.apply_interest(today) {
            Ok(t) => t,
            Err(e) => return Err(self.reject("apply_interest", e)),
        };
        self.notify(FinanceEvent::InterestApplied {
            account: name.clone(),
            amount: transaction.amount(),
        });
        let result = self.store.save_transaction(&name, &transaction, true);
        self.check_persist("transaction", result)?;
        Ok(transaction.amount())
    }

    /// First day of `today`'s month through `today`.
    fn month_to_date(today: NaiveDate) -> (String, String) {
        (fmt_date(month_start(today)), fmt_date(today))
    }

    /// Builds `kind` for the current month, writes it to
    /// `{spending|income}_report_{YYYY-MM}.txt` in the report directory and
    /// returns the rendered text with the file's absolute path. A failed write
    /// fails the whole call.
    pub fn generate_report(&self, kind: ReportKind) -> FinanceResult<(String, PathBuf)> {
        let account = self.current_account()?;
        // One clock read: the period and the file's month must agree.
        let today = self.today();
        let (start, end) = Self::month_to_date(today);
        let report = Report::generate(kind, account, &start, &end)?;
        let text = report.render(&start, &end);

        let path = self.report_dir.join(kind.file_name(today));
        if let Err(e) = fs::write(&path, &text) {
            self.notify(FinanceEvent::ReportFailed {
                kind,
                path: path.clone(),
                error: e.to_string(),
            });
            return Err(e.into());
        }
        let path = fs::canonicalize(&path)?;
        self.notify(FinanceEvent::ReportWritten {
            kind,
            path: path.clone(),
        });
        Ok((text, path))
    }

    /// Spending by category for the current month.
    pub fn spending_for_current_month(&self) -> FinanceResult<Report> {
        let account = self.current_account()?;
        let (start, end) = Self::month_to_date(self.today());
        Report::generate(ReportKind::Spending, account, &start, &end)
    }

    /// Spent-vs-limit for `category` over the current month.
    pub fn budget_status(&self, category: &str, limit: f64) -> FinanceResult<BudgetStatus> {
        let budget = Budget::new(category, limit)?;
        let account = self.current_account()?;
        let (start, end) = Self::month_to_date(self.today());
        let slice = account.transactions_by_period(&start, &end)?;
        Ok(budget.status(slice))
    }

    /// Top spending categories over the whole history, largest first.
    pub fn spending_analysis(&self) -> FinanceResult<Vec<(String, f64)>> {
        let account = self.current_account()?;
        Ok(Report::aggregate(ReportKind::Spending, account.transactions()).top(TOP_CATEGORIES))
    }

    pub fn add_debt(
        &mut self,
        name: &str,
        amount: f64,
        due_date: &str,
        is_loan: bool,
    ) -> FinanceResult<i64> {
        self.active_name()?;
        let mut debt = Debt::new(name, amount, due_date, is_loan)?;
        let result = self.store.save_debt(&debt);
        let id = self.check_persist("debt", result)?;
        debt.id = Some(id);
        self.debts.push(debt);
        self.notify(FinanceEvent::DebtAdded {
            id,
            name: name.to_string(),
            amount,
        });
        Ok(id)
    }

    pub fn update_debt_status(&mut self, debt_id: i64, is_paid: bool) -> FinanceResult<()> {
        self.active_name()?;
        let Some(idx) = self.debts.iter().position(|d| d.id == Some(debt_id)) else {
            return Err(self.reject(
                "update_debt_status",
                FinanceError::debt_not_found(debt_id),
            ));
        };
        self.debts[idx].is_paid = is_paid;
        self.notify(FinanceEvent::DebtStatusChanged {
            id: debt_id,
            is_paid,
        });
        let result = self.store.update_debt(&self.debts[idx]);
        self.check_persist("debt", result)
    }

    pub fn add_savings_goal(&mut self, name: &str, target_amount: f64) -> FinanceResult<i64> {
        self.active_name()?;
        let mut goal = SavingsGoal::new(name, target_amount)?;
        let result = self.store.save_goal(&goal);
        let id = self.check_persist("goal", result)?;
        goal.assign_id(id);
        self.goals.push(goal);
        self.notify(FinanceEvent::GoalAdded {
            id,
            name: name.to_string(),
            target: target_amount,
        });
        Ok(id)
    }

    /// Moves `amount` from the current account into a goal. The expense is
    /// posted first; the goal is only touched once that succeeded, so recorded
    /// progress never exceeds what left the account.
    pub fn add_contribution_to_goal(&mut self, goal_id: i64, amount: f64) -> FinanceResult<()> {
        self.active_name()?;
        ensure_positive(amount, "Contribution")?;
        let Some(idx) = self.goals.iter().position(|g| g.id() == Some(goal_id)) else {
            return Err(self.reject(
                "add_contribution_to_goal",
                FinanceError::goal_not_found(goal_id),
            ));
        };
        let description = format!("Contribution to goal: {}", self.goals[idx].name());
        self.add_transaction(amount, &description, SAVINGS_CATEGORY, false)?;

        let goal = &mut self.goals[idx];
        goal.add_contribution(amount)?;
        let progress = goal.progress();
        self.notify(FinanceEvent::ContributionRecorded {
            goal_id,
            amount,
            progress,
        });
        let result = self.store.update_goal(&self.goals[idx]);
        self.check_persist("goal", result)
    }
}
