// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinanceError, FinanceResult};
use crate::utils::parse_date;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Reserved category that marks a transaction as income.
pub const INCOME_CATEGORY: &str = "Income";
/// Category used for the expense side of a goal contribution.
pub const SAVINGS_CATEGORY: &str = "Savings";
pub const INTEREST_DESCRIPTION: &str = "Interest accrual";
pub const DEFAULT_INTEREST_RATE: f64 = 0.05;

pub(crate) fn ensure_positive(amount: f64, what: &str) -> FinanceResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!(
            "{} must be a positive number, got {}",
            what, amount
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recurrence {
    pub interval_days: u32,
    pub last_processed: NaiveDate,
}

impl Recurrence {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        (today - self.last_processed).num_days() >= i64::from(self.interval_days)
    }

    pub fn next_due_date(&self) -> NaiveDate {
        self.last_processed + Duration::days(i64::from(self.interval_days))
    }
}

/// A single ledger entry. Immutable once built; the amount is always positive
/// and the direction is decided when it is added to an [`Account`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    amount: f64,
    date: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recurrence: Option<Recurrence>,
}

impl Transaction {
    pub fn new(
        amount: f64,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> FinanceResult<Self> {
        ensure_positive(amount, "Amount")?;
        Ok(Self {
            amount,
            date: date.into(),
            description: description.into(),
            category: None,
            recurrence: None,
        })
    }

    pub fn categorized(
        amount: f64,
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> FinanceResult<Self> {
        let mut t = Self::new(amount, date, description)?;
        t.category = Some(category.into());
        Ok(t)
    }

    /// Categorized transaction repeating every `interval_days`, counted from its own date.
    pub fn recurring(
        amount: f64,
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        interval_days: u32,
    ) -> FinanceResult<Self> {
        let mut t = Self::categorized(amount, date, description, category)?;
        let last_processed = parse_date(&t.date)?;
        t.recurrence = Some(Recurrence {
            interval_days,
            last_processed,
        });
        Ok(t)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn recurrence(&self) -> Option<&Recurrence> {
        self.recurrence.as_ref()
    }

    pub fn is_income_category(&self) -> bool {
        self.category() == Some(INCOME_CATEGORY)
    }

    pub fn parsed_date(&self) -> FinanceResult<NaiveDate> {
        parse_date(&self.date)
    }

    /// Always false for one-off transactions.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.recurrence.as_ref().is_some_and(|r| r.is_due(today))
    }

    pub fn next_due_date(&self) -> Option<NaiveDate> {
        self.recurrence.as_ref().map(Recurrence::next_due_date)
    }

    pub fn display(&self) -> String {
        match self.category() {
            Some(cat) => format!(
                "Date: {}, Amount: {:.2}, Category: {}, Description: {}",
                self.date, self.amount, cat, self.description
            ),
            None => format!(
                "Date: {}, Amount: {:.2}, Description: {}",
                self.date, self.amount, self.description
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    Standard,
    Savings { interest_rate: f64 },
}

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    name: String,
    kind: AccountKind,
    balance: f64,
    transactions: Vec<Transaction>,
}

impl Account {
    pub fn new(name: impl Into<String>, initial_balance: f64) -> Self {
        Self::with_kind(name, AccountKind::Standard, initial_balance)
    }

    pub fn savings(name: impl Into<String>, initial_balance: f64, interest_rate: f64) -> Self {
        Self::with_kind(name, AccountKind::Savings { interest_rate }, initial_balance)
    }

    pub fn with_kind(name: impl Into<String>, kind: AccountKind, initial_balance: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            balance: initial_balance,
            transactions: Vec::new(),
        }
    }

    /// Rebuilds an account from persisted history. `balance` is taken as-is;
    /// the store has already replayed the rows to compute it.
    pub fn restore(
        name: impl Into<String>,
        kind: AccountKind,
        transactions: Vec<Transaction>,
        balance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            balance,
            transactions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// In order of addition.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Applies `transaction` to the balance and appends it. On
    /// `InsufficientFunds` neither the balance nor the history changes.
    pub fn add_transaction(&mut self, transaction: Transaction, is_income: bool) -> FinanceResult<()> {
        if is_income {
            self.balance += transaction.amount;
        } else {
            // A NaN balance refuses every expense.
            if self.balance.is_nan() || transaction.amount > self.balance {
                return Err(FinanceError::InsufficientFunds {
                    balance: self.balance,
                    amount: transaction.amount,
                });
            }
            self.balance -= transaction.amount;
        }
        self.transactions.push(transaction);
        Ok(())
    }

    /// Transactions dated within `[start, end]`, in ledger order.
    pub fn transactions_by_period(&self, start: &str, end: &str) -> FinanceResult<Vec<&Transaction>> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        let mut out = Vec::new();
        for t in &self.transactions {
            let d = t.parsed_date()?;
            if start <= d && d <= end {
                out.push(t);
            }
        }
        Ok(out)
    }

    /// Books interest on the current balance as income and returns the booked
    /// transaction so the caller can persist it.
    pub fn apply_interest(&mut self, today: NaiveDate) -> FinanceResult<Transaction> {
        let AccountKind::Savings { interest_rate } = self.kind else {
            return Err(FinanceError::InvalidState(format!(
                "Account '{}' does not accrue interest",
                self.name
            )));
        };
        let interest = self.balance * interest_rate;
        let t = Transaction::categorized(
            interest,
            today.format("%Y-%m-%d").to_string(),
            INTEREST_DESCRIPTION,
            INCOME_CATEGORY,
        )?;
        self.add_transaction(t.clone(), true)?;
        Ok(t)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    pub category: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub exceeded: bool,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: f64) -> FinanceResult<Self> {
        if !limit.is_finite() || limit < 0.0 {
            return Err(FinanceError::Validation(format!(
                "Budget limit must be a non-negative number, got {}",
                limit
            )));
        }
        Ok(Self {
            category: category.into(),
            limit,
        })
    }

    pub fn spent<'a>(&self, transactions: impl IntoIterator<Item = &'a Transaction>) -> f64 {
        transactions
            .into_iter()
            .filter(|t| t.category() == Some(self.category.as_str()))
            .map(Transaction::amount)
            .sum()
    }

    pub fn status<'a>(&self, transactions: impl IntoIterator<Item = &'a Transaction>) -> BudgetStatus {
        let spent = self.spent(transactions);
        BudgetStatus {
            category: self.category.clone(),
            limit: self.limit,
            spent,
            remaining: self.limit - spent,
            exceeded: spent > self.limit,
        }
    }

    pub fn display(&self) -> String {
        format!("Budget for '{}': {:.2}", self.category, self.limit)
    }
}

/// Money owed to (`is_loan = true`) or by the user. `id` is `None` until the
/// store has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Debt {
    pub id: Option<i64>,
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    pub is_loan: bool,
    pub is_paid: bool,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        due_date: impl Into<String>,
        is_loan: bool,
    ) -> FinanceResult<Self> {
        ensure_positive(amount, "Debt amount")?;
        Ok(Self {
            id: None,
            name: name.into(),
            amount,
            due_date: due_date.into(),
            is_loan,
            is_paid: false,
        })
    }

    pub fn mark_as_paid(&mut self) {
        self.is_paid = true;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsGoal {
    id: Option<i64>,
    name: String,
    target_amount: f64,
    current_amount: f64,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: f64) -> FinanceResult<Self> {
        if !target_amount.is_finite() || target_amount < 0.0 {
            return Err(FinanceError::Validation(format!(
                "Target amount must be a non-negative number, got {}",
                target_amount
            )));
        }
        Ok(Self {
            id: None,
            name: name.into(),
            target_amount,
            current_amount: 0.0,
        })
    }

    /// Loads a persisted goal; `current_amount` is clamped into `[0, target]`.
    pub fn restore(id: i64, name: impl Into<String>, target_amount: f64, current_amount: f64) -> Self {
        let target_amount = target_amount.max(0.0);
        Self {
            id: Some(id),
            name: name.into(),
            target_amount,
            current_amount: current_amount.clamp(0.0, target_amount),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_amount(&self) -> f64 {
        self.target_amount
    }

    pub fn current_amount(&self) -> f64 {
        self.current_amount
    }

    /// Saturates at the target instead of failing.
    pub fn add_contribution(&mut self, amount: f64) -> FinanceResult<()> {
        ensure_positive(amount, "Contribution")?;
        self.current_amount = (self.current_amount + amount).min(self.target_amount);
        Ok(())
    }

    /// Percentage in `[0, 100]`; a zero target counts as reached.
    pub fn progress(&self) -> f64 {
        if self.target_amount == 0.0 {
            return 100.0;
        }
        self.current_amount / self.target_amount * 100.0
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

#[derive(Debug, Clone, Default)]
pub struct User {
    pub name: String,
    accounts: BTreeMap<String, Account>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accounts: BTreeMap::new(),
        }
    }

    /// Registers `account` under its name, returning any account it replaced.
    pub fn add_account(&mut self, account: Account) -> Option<Account> {
        self.accounts.insert(account.name().to_string(), account)
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn account_mut(&mut self, name: &str) -> Option<&mut Account> {
        self.accounts.get_mut(name)
    }

    pub fn has_account(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn total_balance(&self) -> f64 {
        self.accounts.values().map(Account::balance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, date: &str, desc: &str, cat: &str) -> Transaction {
        Transaction::categorized(amount, date, desc, cat).unwrap()
    }

    #[test]
    fn transaction_rejects_non_positive_amounts() {
        for amount in [0.0, -0.01, -50.0, f64::NAN, f64::INFINITY] {
            let err = Transaction::new(amount, "2025-01-01", "x").unwrap_err();
            assert!(matches!(err, FinanceError::Validation(_)), "{amount}");
        }
    }

    #[test]
    fn expense_and_income_move_balance() {
        let mut acct = Account::new("Main", 100.0);
        acct.add_transaction(tx(50.0, "2025-10-26", "Salary", INCOME_CATEGORY), true)
            .unwrap();
        assert_eq!(acct.balance(), 150.0);
        acct.add_transaction(tx(30.0, "2025-10-26", "Groceries", "Food"), false)
            .unwrap();
        assert_eq!(acct.balance(), 120.0);
        assert_eq!(acct.transactions().len(), 2);
    }

    #[test]
    fn overdraft_is_rejected_without_side_effects() {
        let mut acct = Account::new("Main", 100.0);
        acct.add_transaction(tx(30.0, "2025-10-26", "Groceries", "Food"), false)
            .unwrap();
        let err = acct
            .add_transaction(tx(120.0, "2025-10-26", "TV", "Electronics"), false)
            .unwrap_err();
        match err {
            FinanceError::InsufficientFunds { balance, amount } => {
                assert_eq!(balance, 70.0);
                assert_eq!(amount, 120.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(acct.balance(), 70.0);
        assert_eq!(acct.transactions().len(), 1);
    }

    #[test]
    fn expense_equal_to_balance_empties_account() {
        let mut acct = Account::new("Main", 42.5);
        acct.add_transaction(tx(42.5, "2025-01-01", "Rent", "Housing"), false)
            .unwrap();
        assert_eq!(acct.balance(), 0.0);
    }

    #[test]
    fn nan_balance_refuses_expenses() {
        let mut acct = Account::new("Main", f64::NAN);
        let err = acct
            .add_transaction(tx(1_000_000.0, "2025-01-01", "Yacht", "Toys"), false)
            .unwrap_err();
        assert!(err.is_insufficient_funds());
        assert!(acct.balance().is_nan());
        assert!(acct.transactions().is_empty());
    }

    #[test]
    fn balance_matches_running_sum() {
        let mut acct = Account::new("Main", 10.0);
        let ops = [
            (5.0, true),
            (12.0, false),
            (100.0, false),
            (2.5, true),
            (5.5, false),
            (1.0, false),
        ];
        let mut expected = 10.0;
        for (amount, income) in ops {
            let res = acct.add_transaction(tx(amount, "2025-01-01", "op", "Misc"), income);
            if income {
                expected += amount;
            } else if amount <= expected {
                expected -= amount;
            } else {
                assert!(res.is_err());
            }
            assert!(acct.balance() >= 0.0);
        }
        assert!((acct.balance() - expected).abs() < 1e-9);
        assert_eq!(acct.transactions().len(), 4);
    }

    #[test]
    fn period_query_is_inclusive_and_ordered() {
        let mut acct = Account::new("Main", 1000.0);
        for (d, desc) in [
            ("2025-01-31", "a"),
            ("2025-01-01", "b"),
            ("2025-02-01", "c"),
            ("2024-12-31", "d"),
        ] {
            acct.add_transaction(tx(1.0, d, desc, "Misc"), false).unwrap();
        }
        let got: Vec<&str> = acct
            .transactions_by_period("2025-01-01", "2025-01-31")
            .unwrap()
            .into_iter()
            .map(Transaction::description)
            .collect();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn period_query_propagates_bad_dates() {
        let mut acct = Account::new("Main", 10.0);
        acct.add_transaction(tx(1.0, "01/02/2025", "legacy", "Misc"), false)
            .unwrap();
        assert!(matches!(
            acct.transactions_by_period("2025-01-01", "2025-12-31"),
            Err(FinanceError::InvalidDate { .. })
        ));
        assert!(matches!(
            Account::new("Empty", 0.0).transactions_by_period("2025-13-01", "2025-12-31"),
            Err(FinanceError::InvalidDate { .. })
        ));
    }

    #[test]
    fn savings_interest_is_booked_as_income() {
        let mut acct = Account::savings("Savings", 200.0, 0.05);
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let t = acct.apply_interest(today).unwrap();
        assert_eq!(t.amount(), 10.0);
        assert_eq!(t.category(), Some(INCOME_CATEGORY));
        assert_eq!(t.description(), INTEREST_DESCRIPTION);
        assert_eq!(t.date(), "2025-03-01");
        assert_eq!(acct.balance(), 210.0);
    }

    #[test]
    fn interest_on_empty_or_standard_account_fails() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(matches!(
            Account::savings("S", 0.0, 0.05).apply_interest(today),
            Err(FinanceError::Validation(_))
        ));
        assert!(matches!(
            Account::new("C", 100.0).apply_interest(today),
            Err(FinanceError::InvalidState(_))
        ));
    }

    #[test]
    fn recurring_due_dates() {
        let t = Transaction::recurring(9.99, "2025-01-10", "Streaming", "Media", 30).unwrap();
        assert_eq!(
            t.next_due_date(),
            NaiveDate::from_ymd_opt(2025, 2, 9)
        );
        assert!(!t.is_due(NaiveDate::from_ymd_opt(2025, 2, 8).unwrap()));
        assert!(t.is_due(NaiveDate::from_ymd_opt(2025, 2, 9).unwrap()));
        assert!(Transaction::recurring(1.0, "soon", "x", "y", 7).is_err());

        let once = tx(1.0, "2025-01-10", "once", "Misc");
        assert!(!once.is_due(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()));
        assert_eq!(once.next_due_date(), None);
    }

    #[test]
    fn budget_counts_only_its_category() {
        let budget = Budget::new("Food", 120.0).unwrap();
        let txs = [
            tx(100.0, "2025-01-01", "Groceries", "Food"),
            tx(50.0, "2025-01-02", "Bus", "Transport"),
            tx(30.0, "2025-01-03", "Cafe", "Food"),
        ];
        let status = budget.status(&txs);
        assert_eq!(status.spent, 130.0);
        assert_eq!(status.remaining, -10.0);
        assert!(status.exceeded);
        assert_eq!(budget.display(), "Budget for 'Food': 120.00");
        assert!(Budget::new("Food", -1.0).is_err());
    }

    #[test]
    fn goal_contributions_clamp_at_target() {
        let mut goal = SavingsGoal::new("Car", 40000.0).unwrap();
        goal.add_contribution(30000.0).unwrap();
        assert_eq!(goal.current_amount(), 30000.0);
        assert_eq!(goal.progress(), 75.0);
        goal.add_contribution(20000.0).unwrap();
        assert_eq!(goal.current_amount(), 40000.0);
        assert_eq!(goal.progress(), 100.0);
        assert!(goal.is_reached());
    }

    #[test]
    fn goal_rejects_non_positive_contribution() {
        let mut goal = SavingsGoal::new("Trip", 100.0).unwrap();
        for amount in [0.0, -5.0] {
            assert!(matches!(
                goal.add_contribution(amount),
                Err(FinanceError::Validation(_))
            ));
        }
        assert_eq!(goal.current_amount(), 0.0);
    }

    #[test]
    fn goal_progress_stays_in_range() {
        let zero = SavingsGoal::new("Nothing", 0.0).unwrap();
        assert_eq!(zero.progress(), 100.0);

        let mut goal = SavingsGoal::new("Laptop", 999.0).unwrap();
        let mut last = goal.current_amount();
        for amount in [1.0, 500.0, 0.5, 1000.0, 3.0] {
            goal.add_contribution(amount).unwrap();
            assert!(goal.current_amount() >= last);
            assert!(goal.current_amount() <= goal.target_amount());
            assert!((0.0..=100.0).contains(&goal.progress()));
            last = goal.current_amount();
        }

        let restored = SavingsGoal::restore(1, "Over", 10.0, 25.0);
        assert_eq!(restored.current_amount(), 10.0);
    }

    #[test]
    fn user_tracks_accounts_by_name() {
        let mut user = User::new("me");
        assert!(user.add_account(Account::new("Cash", 10.0)).is_none());
        user.add_account(Account::new("Card", 5.5));
        let old = user.add_account(Account::new("Cash", 1.0)).unwrap();
        assert_eq!(old.balance(), 10.0);
        assert_eq!(user.total_balance(), 6.5);
        assert!(user.has_account("Card"));
        assert!(user.account("Missing").is_none());
        let names: Vec<&str> = user.accounts().map(Account::name).collect();
        assert_eq!(names, vec!["Card", "Cash"]);
    }

    #[test]
    fn debt_lifecycle() {
        let mut debt = Debt::new("Bob", 250.0, "2025-06-01", true).unwrap();
        assert_eq!(debt.id, None);
        assert!(!debt.is_paid);
        debt.mark_as_paid();
        assert!(debt.is_paid);
        assert!(Debt::new("Bob", 0.0, "2025-06-01", false).is_err());
    }
}
