//! Money Flow
//!
//! Daily net totals across every transaction, transfers and inflows included,
//! from the first day of history to the last. Days without activity are 0.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, UserSession};

/// One day's net amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    /// Signed net: spending positive, inflows negative
    pub amount: Money,
}

/// Money Flow report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyFlow {
    /// One entry per calendar day, oldest first
    pub days: Vec<DailyFlow>,
}

impl MoneyFlow {
    /// Generate the daily series for a session's full history
    pub fn generate(session: &UserSession) -> Self {
        let mut totals: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        for txn in session.all_transactions() {
            *totals.entry(txn.date).or_insert_with(Money::zero) += txn.amount;
        }

        let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back())
        else {
            return Self { days: Vec::new() };
        };

        let mut days = Vec::with_capacity((last - first).num_days() as usize + 1);
        let mut date = first;
        while date <= last {
            days.push(DailyFlow {
                date,
                amount: totals.get(&date).copied().unwrap_or_default(),
            });
            date += Duration::days(1);
        }

        Self { days }
    }

    /// Sum of every daily amount
    pub fn net_total(&self) -> Money {
        self.days.iter().map(|d| d.amount).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Money Flow\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>14}\n", "Date", "Net"));
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for day in &self.days {
            output.push_str(&format!("{:<12} {:>14}\n", day.date, day.amount));
        }

        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("{:<12} {:>14}\n", "NET", self.net_total()));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        writeln!(writer, "Date,Amount").map_err(|e| BudgetError::Export(e.to_string()))?;
        for day in &self.days {
            writeln!(writer, "{},{:.2}", day.date, day.amount.to_dollars())
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
        Ok(())
    }
}
