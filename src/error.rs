// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types surfaced by the ledger and the finance service.

use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    /// Malformed input at construction or mutation time.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An expense would drive the balance below zero.
    #[error("Insufficient funds: balance is {balance:.2}, attempted to spend {amount:.2}")]
    InsufficientFunds { balance: f64, amount: f64 },

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FinanceResult<T> = Result<T, FinanceError>;

impl FinanceError {
    pub fn account_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Account",
            identifier: name.into(),
        }
    }

    pub fn debt_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Debt",
            identifier: id.to_string(),
        }
    }

    pub fn goal_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Savings goal",
            identifier: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_carries_both_amounts() {
        let e = FinanceError::InsufficientFunds {
            balance: 70.0,
            amount: 120.0,
        };
        assert_eq!(
            e.to_string(),
            "Insufficient funds: balance is 70.00, attempted to spend 120.00"
        );
        assert!(e.is_insufficient_funds());
    }

    #[test]
    fn not_found_helpers() {
        assert_eq!(
            FinanceError::account_not_found("Cash").to_string(),
            "Account not found: Cash"
        );
        assert!(FinanceError::debt_not_found(7).is_not_found());
        assert_eq!(
            FinanceError::goal_not_found(3).to_string(),
            "Savings goal not found: 3"
        );
    }
}
