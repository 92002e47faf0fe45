// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FinanceResult;
use crate::models::{Account, Transaction};
use crate::utils::month_key;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Spending,
    Income,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Spending => "Spending report",
            ReportKind::Income => "Income report",
        }
    }

    pub fn file_prefix(self) -> &'static str {
        match self {
            ReportKind::Spending => "spending_report",
            ReportKind::Income => "income_report",
        }
    }

    /// `{spending|income}_report_{YYYY-MM}.txt`
    pub fn file_name(self, month: NaiveDate) -> String {
        format!("{}_{}.txt", self.file_prefix(), month_key(month))
    }

    /// Grouping key for `t`, or `None` when `t` does not belong in this report.
    /// Spending groups non-income categories; income groups income rows by description.
    fn key_for(self, t: &Transaction) -> Option<&str> {
        let category = t.category()?;
        match self {
            ReportKind::Spending if !t.is_income_category() => Some(category),
            ReportKind::Income if t.is_income_category() => Some(t.description()),
            _ => None,
        }
    }
}

/// Per-key running sums, kept in order of first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub kind: ReportKind,
    pub entries: Vec<(String, f64)>,
}

impl Report {
    pub fn aggregate<'a>(
        kind: ReportKind,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        for t in transactions {
            let Some(key) = kind.key_for(t) else { continue };
            match entries.iter_mut().find(|(k, _)| k.as_str() == key) {
                Some((_, sum)) => *sum += t.amount(),
                None => entries.push((key.to_string(), t.amount())),
            }
        }
        Self { kind, entries }
    }

    /// Aggregates the account's transactions dated within `[start, end]`.
    pub fn generate(kind: ReportKind, account: &Account, start: &str, end: &str) -> FinanceResult<Self> {
        let slice = account.transactions_by_period(start, end)?;
        Ok(Self::aggregate(kind, slice))
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// The `n` largest entries, descending; equal sums keep their original order.
    pub fn top(&self, n: usize) -> Vec<(String, f64)> {
        let mut items = self.entries.clone();
        items.sort_by(|a, b| b.1.total_cmp(&a.1));
        items.truncate(n);
        items
    }

    /// Plain-text rendering written to the report file.
    pub fn render(&self, start: &str, end: &str) -> String {
        let mut out = format!("{} from {} to {}\n\n", self.kind.title(), start, end);
        if self.is_empty() {
            out.push_str("No data for this period.");
            return out;
        }
        for (key, value) in &self.entries {
            out.push_str(&format!("- {}: {:.2}\n", key, value));
        }
        out.push_str(&format!("\nTotal: {:.2}", self.total()));
        out
    }
}
