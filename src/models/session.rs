//! Per-request view over one user's transactions
//!
//! A session owns the full history, derives the expense subset once, and
//! carries the window and aggregation level the engine should use. It holds
//! no results: each engine stage returns its own findings.

use chrono::NaiveDate;

use super::category::CategoryLevel;
use super::transaction::Transaction;
use crate::config::Settings;

/// Default trailing window in calendar months
pub const DEFAULT_WINDOW_MONTHS: usize = 12;

/// Default top-level category excluded from expenses
pub const DEFAULT_TRANSFER_CATEGORY: &str = "Transfers";

/// One user's transactions plus the knobs the engine reads
#[derive(Debug, Clone)]
pub struct UserSession {
    all_transactions: Vec<Transaction>,
    expenses: Vec<Transaction>,
    past_months_window: usize,
    category_level: CategoryLevel,
}

impl UserSession {
    /// Create a session over a user's full history
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self::with_transfer_category(transactions, DEFAULT_TRANSFER_CATEGORY)
    }

    /// Create a session, excluding a custom transfer category from expenses
    pub fn with_transfer_category(transactions: Vec<Transaction>, transfer_category: &str) -> Self {
        let expenses = transactions
            .iter()
            .filter(|t| t.is_expense(transfer_category))
            .cloned()
            .collect();

        Self {
            all_transactions: transactions,
            expenses,
            past_months_window: DEFAULT_WINDOW_MONTHS,
            category_level: CategoryLevel::default(),
        }
    }

    /// Create a session over the transactions of one account in a shared list
    pub fn for_account(account_id: &str, transactions: &[Transaction]) -> Self {
        Self::new(
            transactions
                .iter()
                .filter(|t| t.account_id == account_id)
                .cloned()
                .collect(),
        )
    }

    /// Create a session using configured window, level and transfer name
    pub fn from_settings(transactions: Vec<Transaction>, settings: &Settings) -> Self {
        Self::with_transfer_category(transactions, &settings.transfer_category)
            .with_window(settings.past_months_window)
            .with_category_level(settings.category_level)
    }

    pub fn with_window(mut self, months: usize) -> Self {
        self.past_months_window = months;
        self
    }

    pub fn with_category_level(mut self, level: CategoryLevel) -> Self {
        self.category_level = level;
        self
    }

    pub fn all_transactions(&self) -> &[Transaction] {
        &self.all_transactions
    }

    /// Spending transactions, transfers excluded
    pub fn expenses(&self) -> &[Transaction] {
        &self.expenses
    }

    pub fn past_months_window(&self) -> usize {
        self.past_months_window
    }

    pub fn category_level(&self) -> CategoryLevel {
        self.category_level
    }

    /// Earliest and latest expense dates
    pub fn expense_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.expenses.iter().map(|t| t.date).min()?;
        let last = self.expenses.iter().map(|t| t.date).max()?;
        Some((first, last))
    }

    /// Date of the most recent expense
    pub fn latest_expense_date(&self) -> Option<NaiveDate> {
        self.expenses.iter().map(|t| t.date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPath, Money};

    fn txn(account: &str, day: u32, cents: i64, top: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            Money::from_cents(cents),
            CategoryPath::new("x", "y", top),
        )
        .with_account(account)
    }

    #[test]
    fn test_expenses_exclude_transfers_and_inflows() {
        let session = UserSession::new(vec![
            txn("a", 1, 1000, "Food"),
            txn("a", 2, -5000, "Income"),
            txn("a", 3, 20000, "Transfers"),
            txn("a", 4, 0, "Food"),
        ]);

        assert_eq!(session.all_transactions().len(), 4);
        assert_eq!(session.expenses().len(), 1);
        assert_eq!(session.past_months_window(), 12);
        assert_eq!(session.category_level(), CategoryLevel::Top);
    }

    #[test]
    fn test_for_account_filters() {
        let shared = vec![txn("a", 1, 1000, "Food"), txn("b", 2, 2000, "Food")];
        let session = UserSession::for_account("b", &shared);
        assert_eq!(session.all_transactions().len(), 1);
        assert_eq!(session.expenses()[0].amount, Money::from_cents(2000));
    }

    #[test]
    fn test_expense_span() {
        let session = UserSession::new(vec![txn("a", 20, 100, "Food"), txn("a", 5, 100, "Food")]);
        let (first, last) = session.expense_span().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert!(UserSession::new(Vec::new()).expense_span().is_none());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            past_months_window: 6,
            category_level: CategoryLevel::Parent,
            transfer_category: "Moves".to_string(),
            ..Settings::default()
        };
        let session = UserSession::from_settings(
            vec![txn("a", 1, 100, "Moves"), txn("a", 2, 100, "Transfers")],
            &settings,
        );
        assert_eq!(session.past_months_window(), 6);
        assert_eq!(session.category_level(), CategoryLevel::Parent);
        assert_eq!(session.expenses().len(), 1);
        assert_eq!(session.expenses()[0].category.top, "Transfers");
    }
}
