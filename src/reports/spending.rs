//! Spending Breakdown
//!
//! Dollar totals per category for a pie chart. Categories that account for
//! only a small share of expense transactions (by count, not by amount) are
//! folded into one "Other" slice.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::escape_csv;
use crate::models::{
    round_cents, BudgetMap, CategoryLevel, Money, TimePeriod, Transaction, UserSession,
};
use crate::services::filter_by_period;

/// One category's spending and transaction share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Category name
    pub category: String,
    /// Name of the slice the category is shown under
    pub slice: String,
    /// Total spending
    pub total_spending: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Share of all expense transactions, 0..=1
    pub count_share: f64,
}

/// Spending Breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingBreakdown {
    pub level: CategoryLevel,
    /// Trailing window applied before counting, if any
    pub period: Option<TimePeriod>,
    /// Dollar total per slice
    pub slices: BudgetMap,
    /// Per-category detail, largest count first
    pub categories: Vec<CategoryShare>,
    /// Total spending across all categories
    pub total_spending: Money,
    /// Total transaction count
    pub total_transactions: usize,
}

impl SpendingBreakdown {
    /// Generate a breakdown over the session's whole expense history
    pub fn generate(session: &UserSession, level: CategoryLevel, settings: &Settings) -> Self {
        Self::build(session.expenses(), level, None, settings)
    }

    /// Generate a breakdown over a trailing window of the expense history
    pub fn generate_for_period(
        session: &UserSession,
        level: CategoryLevel,
        period: TimePeriod,
        settings: &Settings,
    ) -> Self {
        let expenses = filter_by_period(session.expenses(), period);
        Self::build(&expenses, level, Some(period), settings)
    }

    fn build(
        expenses: &[Transaction],
        level: CategoryLevel,
        period: Option<TimePeriod>,
        settings: &Settings,
    ) -> Self {
        let mut by_category: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
        for txn in expenses {
            let entry = by_category
                .entry(txn.category(level))
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }

        let total_transactions = expenses.len();
        let mut categories: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(name, (total_spending, transaction_count))| {
                let count_share = transaction_count as f64 / total_transactions as f64;
                let slice = if count_share <= settings.spending_share_floor {
                    settings.other_label.clone()
                } else {
                    name.to_string()
                };
                CategoryShare {
                    category: name.to_string(),
                    slice,
                    total_spending,
                    transaction_count,
                    count_share,
                }
            })
            .collect();

        // Most transactions first
        categories.sort_by(|a, b| {
            b.transaction_count
                .cmp(&a.transaction_count)
                .then_with(|| a.category.cmp(&b.category))
        });

        let mut slices = BudgetMap::new();
        for share in &categories {
            slices.add(share.slice.as_str(), share.total_spending.to_dollars());
        }
        slices.map_values(round_cents);

        Self {
            level,
            period,
            slices,
            total_spending: categories.iter().map(|c| c.total_spending).sum(),
            categories,
            total_transactions,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        let window = self
            .period
            .map(|p| format!(" (last {})", p))
            .unwrap_or_default();
        output.push_str(&format!("Spending Breakdown by {}{}\n", self.level, window));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Spending: {}\n", self.total_spending));
        output.push_str(&format!("Total Transactions: {}\n\n", self.total_transactions));

        output.push_str(&format!("{:<35} {:>14}\n", "Slice", "Amount"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (slice, amount) in self.slices.sorted_by_amount() {
            output.push_str(&format!(
                "{:<35} {:>14}\n",
                slice,
                Money::from_dollars(amount)
            ));
        }

        output.push_str(&format!(
            "\n{:<35} {:>14} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for share in &self.categories {
            output.push_str(&format!(
                "{:<35} {:>14} {:>8} {:>7.1}%\n",
                share.category,
                share.total_spending,
                share.transaction_count,
                share.count_share * 100.0
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        writeln!(writer, "Category,Slice,Amount,Transaction Count,Count Share")
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        for share in &self.categories {
            writeln!(
                writer,
                "{},{},{:.2},{},{:.4}",
                escape_csv(&share.category),
                escape_csv(&share.slice),
                share.total_spending.to_dollars(),
                share.transaction_count,
                share.count_share
            )
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryPath;
    use chrono::NaiveDate;

    fn spend(day: u32, cents: i64, top: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            Money::from_cents(cents),
            CategoryPath::new(format!("{} item", top), format!("{} group", top), top),
        )
    }

    /// 20 expenses: Food 15, Home 4, Gifts 1 (5% exactly)
    fn session() -> UserSession {
        let mut txns = Vec::new();
        for day in 1..=15 {
            txns.push(spend(day, 1000, "Food"));
        }
        for day in 1..=4 {
            txns.push(spend(day, 50_000, "Home"));
        }
        txns.push(spend(20, 2500, "Gifts"));
        txns.push(spend(21, 99_999, "Transfers"));
        UserSession::new(txns)
    }

    #[test]
    fn test_rare_categories_become_other() {
        let settings = Settings::default();
        let report = SpendingBreakdown::generate(&session(), CategoryLevel::Top, &settings);

        assert_eq!(report.total_transactions, 20);
        assert_eq!(report.slices.get("Other"), Some(25.0));
        assert_eq!(report.slices.get("Food"), Some(150.0));
        assert_eq!(report.slices.get("Home"), Some(2000.0));
        assert!(!report.slices.contains("Gifts"));
        assert!(!report.slices.contains("Transfers"));
        assert_eq!(report.categories[0].category, "Food");
    }

    #[test]
    fn test_share_is_by_count_not_amount() {
        // Home is 93% of the dollars but only 20% of the rows
        let settings = Settings::default();
        let report = SpendingBreakdown::generate(&session(), CategoryLevel::Top, &settings);
        let home = report
            .categories
            .iter()
            .find(|c| c.category == "Home")
            .unwrap();
        assert!((home.count_share - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_period_filter() {
        let settings = Settings::default();
        // Latest expense is 2025-01-20; a week keeps 14th..20th
        let report = SpendingBreakdown::generate_for_period(
            &session(),
            CategoryLevel::Parent,
            TimePeriod::Week,
            &settings,
        );
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.period, Some(TimePeriod::Week));
        assert!(report.slices.contains("Food group"));
    }

    #[test]
    fn test_format_and_csv() {
        let settings = Settings::default();
        let report = SpendingBreakdown::generate(&session(), CategoryLevel::Top, &settings);
        assert!(report.format_terminal().contains("Spending Breakdown by top"));

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Category,Slice,Amount"));
        assert!(text.contains("Gifts,Other,25.00,1,0.0500"));
    }

    #[test]
    fn test_csv_export_quotes_commas() {
        let settings = Settings::default();
        let mut txns: Vec<_> = (1..=9).map(|day| spend(day, 1000, "Food")).collect();
        txns.push(spend(10, 500, "Coffee, Tea"));
        let report =
            SpendingBreakdown::generate(&UserSession::new(txns), CategoryLevel::Top, &settings);

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        let coffee = rows.iter().find(|r| &r[0] == "Coffee, Tea").unwrap();
        assert_eq!(coffee.len(), 5);
        assert_eq!(&coffee[2], "5.00");
    }

    #[test]
    fn test_empty_session() {
        let settings = Settings::default();
        let report =
            SpendingBreakdown::generate(&UserSession::new(Vec::new()), CategoryLevel::Top, &settings);
        assert!(report.slices.is_empty());
        assert_eq!(report.total_spending, Money::zero());
    }
}
