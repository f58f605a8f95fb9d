//! Transaction sources
//!
//! The engine reads a flat transaction list from whatever holds the data.
//! `CsvTransactionSource` reads the exported per-account CSV layout;
//! `InMemorySource` hands over an existing list.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use tracing::debug;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryPath, Money, Transaction};

/// Anything that can produce a user's transactions
pub trait TransactionSource {
    fn transactions(&self) -> BudgetResult<Vec<Transaction>>;
}

/// Date formats tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// One CSV row, named by header
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(default, alias = "plaid_account_id")]
    account_id: String,
    category_name: String,
    parent_category_name: String,
    grandparent_category_name: String,
    amount_cents: i64,
    date: String,
}

impl CsvRecord {
    fn into_transaction(self) -> Result<Transaction, String> {
        let date = parse_date(self.date.trim())?;
        Ok(Transaction::new(
            date,
            Money::from_cents(self.amount_cents),
            CategoryPath::new(
                self.category_name.trim(),
                self.parent_category_name.trim(),
                self.grandparent_category_name.trim(),
            ),
        )
        .with_account(self.account_id.trim()))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .ok_or_else(|| format!("Could not parse date: '{}'", s))
}

/// Reads transactions from a header-named CSV file
#[derive(Debug, Clone)]
pub struct CsvTransactionSource {
    path: PathBuf,
}

impl CsvTransactionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse transactions from any reader holding the CSV layout
    ///
    /// The first malformed row fails the whole read with its line number.
    pub fn parse_reader<R: Read>(reader: R) -> BudgetResult<Vec<Transaction>> {
        let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers: StringRecord = reader.headers()?.clone();

        let mut transactions = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let row: CsvRecord = record
                .deserialize(Some(&headers))
                .map_err(|e| BudgetError::Import(format!("line {}: {}", line, e)))?;
            let txn = row
                .into_transaction()
                .map_err(|e| BudgetError::Import(format!("line {}: {}", line, e)))?;
            transactions.push(txn);
        }
        Ok(transactions)
    }
}

impl TransactionSource for CsvTransactionSource {
    fn transactions(&self) -> BudgetResult<Vec<Transaction>> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            BudgetError::Import(format!("Failed to open {}: {}", self.path.display(), e))
        })?;
        let transactions = Self::parse_reader(file)?;
        debug!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded transactions"
        );
        Ok(transactions)
    }
}

/// A fixed list of transactions
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    transactions: Vec<Transaction>,
}

impl InMemorySource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionSource for InMemorySource {
    fn transactions(&self) -> BudgetResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}
