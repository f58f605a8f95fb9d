//! Trailing time-window filter
//!
//! Subsets a transaction history to the day, week, month or year ending at
//! its latest transaction. The cutoff is exclusive.

use chrono::Duration;

use crate::error::BudgetResult;
use crate::models::{TimePeriod, Transaction};

/// Sort transactions by date and keep those strictly after `latest - offset`
pub fn filter_by_period(transactions: &[Transaction], period: TimePeriod) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|t| t.date);

    let (Some(offset), Some(latest)) = (period.offset_days(), sorted.last().map(|t| t.date))
    else {
        return sorted;
    };

    let cutoff = latest - Duration::days(offset);
    sorted.retain(|t| t.date > cutoff);
    sorted
}

/// Same as [`filter_by_period`], parsing the period from its tag
pub fn filter_by_tag(transactions: &[Transaction], tag: &str) -> BudgetResult<Vec<Transaction>> {
    let period: TimePeriod = tag.parse()?;
    Ok(filter_by_period(transactions, period))
}
