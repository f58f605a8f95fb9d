//! Transaction model
//!
//! Transactions are read-only inputs handed over by the data source. A
//! positive amount is money spent; inflows are negative.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{CategoryLevel, CategoryPath};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account the transaction was posted to
    #[serde(default)]
    pub account_id: String,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for spending, negative for inflow)
    pub amount: Money,

    /// Category at every hierarchy level
    pub category: CategoryPath,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, amount: Money, category: CategoryPath) -> Self {
        Self {
            account_id: String::new(),
            date,
            amount,
            category,
        }
    }

    /// Set the owning account
    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    /// Category name at the given level
    pub fn category(&self, level: CategoryLevel) -> &str {
        self.category.at(level)
    }

    /// Amount in decimal dollars
    pub fn dollars(&self) -> f64 {
        self.amount.to_dollars()
    }

    /// Check if this is spending (positive amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this transaction is a transfer under the given top-level name
    pub fn is_transfer(&self, transfer_category: &str) -> bool {
        self.category.top == transfer_category
    }

    /// Check if this transaction counts as an expense
    pub fn is_expense(&self, transfer_category: &str) -> bool {
        self.is_outflow() && !self.is_transfer(transfer_category)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category.specific,
            self.amount
        )
    }
}
