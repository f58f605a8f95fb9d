//! Activity Feed
//!
//! Recent transactions for a dashboard list or a per-transaction spending
//! chart: newest first, labelled at a chosen category level, and signed the
//! way a bank statement shows them (spending negative, inflows positive).

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::export::escape_csv;
use crate::models::{CategoryLevel, Money, UserSession};

/// Dashboard date format, e.g. "03/07/25"
pub const ACTIVITY_DATE_FORMAT: &str = "%m/%d/%y";

/// One row of the feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    #[serde(skip)]
    pub date: NaiveDate,
    /// Date formatted for display
    pub display_date: String,
    pub category: String,
    /// Statement-signed amount
    pub amount: Money,
    pub account_id: String,
}

/// Activity Feed report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityFeed {
    pub level: CategoryLevel,
    pub entries: Vec<ActivityEntry>,
}

impl ActivityFeed {
    /// Generate the feed labelled by specific category
    pub fn generate(session: &UserSession, limit: Option<usize>) -> Self {
        Self::generate_at_level(session, CategoryLevel::Specific, limit)
    }

    /// Generate the feed labelled at `level`, optionally keeping only the
    /// newest `limit` rows
    pub fn generate_at_level(
        session: &UserSession,
        level: CategoryLevel,
        limit: Option<usize>,
    ) -> Self {
        let mut transactions: Vec<_> = session.all_transactions().iter().collect();
        // Stable, so same-day rows keep their source order
        transactions.sort_by(|a, b| b.date.cmp(&a.date));

        let entries = transactions
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|txn| ActivityEntry {
                date: txn.date,
                display_date: txn.date.format(ACTIVITY_DATE_FORMAT).to_string(),
                category: txn.category(level).to_string(),
                amount: -txn.amount,
                account_id: txn.account_id.clone(),
            })
            .collect();

        Self { level, entries }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<10} {:<30} {:>14}\n",
            "Date",
            format!("Category ({})", self.level),
            "Amount"
        ));
        output.push_str(&"-".repeat(56));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<10} {:<30} {:>14}\n",
                entry.display_date, entry.category, entry.amount
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        writeln!(writer, "Date,Category,Amount").map_err(|e| BudgetError::Export(e.to_string()))?;
        for entry in &self.entries {
            writeln!(
                writer,
                "{},{},{:.2}",
                entry.display_date,
                escape_csv(&entry.category),
                entry.amount.to_dollars()
            )
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPath, Transaction};

    fn txn(m: u32, d: u32, cents: i64, specific: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, m, d).unwrap(),
            Money::from_cents(cents),
            CategoryPath::new(specific, "Parent", "Top"),
        )
    }

    #[test]
    fn test_newest_first_with_flipped_sign() {
        let session = UserSession::new(vec![
            txn(1, 5, 1299, "Coffee Shops"),
            txn(3, 7, -250_000, "Paycheck"),
            txn(2, 1, 4000, "Gas Stations"),
        ]);
        let feed = ActivityFeed::generate(&session, None);

        let dates: Vec<_> = feed.entries.iter().map(|e| e.display_date.as_str()).collect();
        assert_eq!(dates, vec!["03/07/25", "02/01/25", "01/05/25"]);
        assert_eq!(feed.entries[0].amount, Money::from_cents(250_000));
        assert_eq!(feed.entries[2].amount, Money::from_cents(-1299));
        assert_eq!(feed.entries[2].category, "Coffee Shops");
    }

    #[test]
    fn test_limit() {
        let session = UserSession::new(vec![
            txn(1, 1, 100, "A"),
            txn(1, 2, 100, "B"),
            txn(1, 3, 100, "C"),
        ]);
        let feed = ActivityFeed::generate(&session, Some(2));
        assert_eq!(feed.entries.len(), 2);
        assert_eq!(feed.entries[0].category, "C");
    }

    #[test]
    fn test_csv_export() {
        let session = UserSession::new(vec![txn(1, 5, 1299, "Coffee Shops")]);
        let mut out = Vec::new();
        ActivityFeed::generate(&session, None)
            .export_csv(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Category,Amount\n01/05/25,Coffee Shops,-12.99\n"
        );
    }

    #[test]
    fn test_labels_at_requested_level() {
        let session = UserSession::new(vec![
            txn(1, 5, 1299, "Coffee Shops"),
            txn(1, 6, 4000, "Gas Stations"),
        ]);
        let feed = ActivityFeed::generate_at_level(&session, CategoryLevel::Top, None);

        assert_eq!(feed.level, CategoryLevel::Top);
        assert!(feed.entries.iter().all(|e| e.category == "Top"));
        assert!(feed.format_terminal().contains("Category (top)"));
    }

    #[test]
    fn test_csv_export_quotes_commas() {
        let session = UserSession::new(vec![
            txn(1, 5, 1299, "Coffee, Tea"),
            txn(1, 6, 350, "Say \"Cheese\""),
        ]);
        let mut out = Vec::new();
        ActivityFeed::generate(&session, None)
            .export_csv(&mut out)
            .unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Say \"Cheese\"");
        assert_eq!(&rows[1][1], "Coffee, Tea");
        assert_eq!(&rows[1][2], "-12.99");
    }
}
