// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Debt, SavingsGoal, Transaction};
use crate::store::{LedgerStore, StoreError, StoreResult};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Purse", "purse"));

/// Overrides the platform data dir when set.
pub const DB_ENV: &str = "PURSE_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("purse.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    open_at(&path)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_name TEXT NOT NULL,
        amount REAL NOT NULL,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT,
        is_income INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_name);

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount REAL NOT NULL,
        due_date TEXT NOT NULL,
        is_loan INTEGER NOT NULL,
        is_paid INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        target_amount REAL NOT NULL,
        current_amount REAL NOT NULL DEFAULT 0
    );

    -- FX rates: 1 base = rate quote, one row per day
    CREATE TABLE IF NOT EXISTS fx_rates(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        base TEXT NOT NULL,
        quote TEXT NOT NULL,
        rate TEXT NOT NULL,
        UNIQUE(date, base, quote)
    );
    "#,
    )
}

/// [`LedgerStore`] over a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> StoreResult<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl LedgerStore for SqliteStore {
    fn save_transaction(
        &mut self,
        account_name: &str,
        transaction: &Transaction,
        is_income: bool,
    ) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO transactions(account_name, amount, date, description, category, is_income)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                account_name,
                transaction.amount(),
                transaction.date(),
                transaction.description(),
                transaction.category(),
                is_income
            ],
        )?;
        Ok(())
    }

    fn load_transactions_for_account(
        &self,
        account_name: &str,
    ) -> StoreResult<(Vec<Transaction>, f64)> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, date, description, category, is_income
             FROM transactions WHERE account_name=?1 ORDER BY id",
        )?;
        let mut rows = stmt.query(params![account_name])?;
        let mut out = Vec::new();
        let mut balance = 0.0;
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let amount: f64 = r.get(1)?;
            let date: String = r.get(2)?;
            let desc: String = r.get(3)?;
            let category: Option<String> = r.get(4)?;
            let is_income: bool = r.get(5)?;
            let built = match category {
                Some(cat) => Transaction::categorized(amount, date, desc, cat),
                None => Transaction::new(amount, date, desc),
            };
            let t = built.map_err(|e| StoreError::Corrupt {
                table: "transactions",
                row: id,
                detail: e.to_string(),
            })?;
            if is_income {
                balance += amount;
            } else {
                balance -= amount;
            }
            out.push(t);
        }
        Ok((out, balance))
    }

    fn save_debt(&mut self, debt: &Debt) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO debts(name, amount, due_date, is_loan, is_paid) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![debt.name, debt.amount, debt.due_date, debt.is_loan, debt.is_paid],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_debt(&mut self, debt: &Debt) -> StoreResult<()> {
        let id = debt.id.ok_or(StoreError::Unsaved("Debt"))?;
        self.conn.execute(
            "UPDATE debts SET name=?1, amount=?2, due_date=?3, is_loan=?4, is_paid=?5 WHERE id=?6",
            params![debt.name, debt.amount, debt.due_date, debt.is_loan, debt.is_paid, id],
        )?;
        Ok(())
    }

    fn load_debts(&self) -> StoreResult<Vec<Debt>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, amount, due_date, is_loan, is_paid FROM debts ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Debt {
                id: Some(r.get(0)?),
                name: r.get(1)?,
                amount: r.get(2)?,
                due_date: r.get(3)?,
                is_loan: r.get(4)?,
                is_paid: r.get(5)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn save_goal(&mut self, goal: &SavingsGoal) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO goals(name, target_amount, current_amount) VALUES (?1, ?2, ?3)",
            params![goal.name(), goal.target_amount(), goal.current_amount()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_goal(&mut self, goal: &SavingsGoal) -> StoreResult<()> {
        let id = goal.id().ok_or(StoreError::Unsaved("Savings goal"))?;
        self.conn.execute(
            "UPDATE goals SET name=?1, target_amount=?2, current_amount=?3 WHERE id=?4",
            params![goal.name(), goal.target_amount(), goal.current_amount(), id],
        )?;
        Ok(())
    }

    fn load_goals(&self) -> StoreResult<Vec<SavingsGoal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, target_amount, current_amount FROM goals ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(SavingsGoal::restore(r.get(0)?, r.get::<_, String>(1)?, r.get(2)?, r.get(3)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
