//! Monthly aggregation
//!
//! Buckets expenses into a month × category matrix covering the trailing N
//! calendar months that end at the latest transaction's month, and prunes
//! categories that are active too rarely to forecast.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{BudgetMap, CategoryLevel, MonthKey, Transaction};

/// Month × category totals in dollars
///
/// Rows are months, oldest first. Every category column has one cell per
/// month; months without activity hold 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthMatrix {
    months: Vec<MonthKey>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl MonthMatrix {
    /// A matrix with no months and no categories
    pub fn empty() -> Self {
        Self::default()
    }

    /// Months covered, oldest first
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    /// Row labels in "M/YY" form, oldest first
    pub fn labels(&self) -> Vec<String> {
        self.months.iter().map(MonthKey::label).collect()
    }

    pub fn num_months(&self) -> usize {
        self.months.len()
    }

    pub fn num_categories(&self) -> usize {
        self.columns.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// A category's monthly series, oldest first
    pub fn column(&self, category: &str) -> Option<&[f64]> {
        self.columns.get(category).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// One month's totals by category
    pub fn row(&self, index: usize) -> Option<BudgetMap> {
        if index >= self.months.len() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|(name, series)| (name.as_str(), series[index]))
                .collect(),
        )
    }

    /// Number of months with non-zero spend in a category
    pub fn active_months(&self, category: &str) -> usize {
        self.column(category)
            .map(|series| series.iter().filter(|v| **v != 0.0).count())
            .unwrap_or(0)
    }

    pub fn remove_column(&mut self, category: &str) -> Option<Vec<f64>> {
        self.columns.remove(category)
    }

    /// Replace the named columns by one column holding their cell-wise sum
    ///
    /// Names not present in the matrix are ignored. The merged column
    /// replaces any existing column called `into`, matching how the residual
    /// budget entry replaces a category of the same name.
    pub fn merge_columns<S: AsRef<str>>(&mut self, names: &[S], into: &str) {
        let mut merged = vec![0.0; self.months.len()];
        let mut found = false;
        for name in names {
            if let Some(series) = self.columns.remove(name.as_ref()) {
                found = true;
                for (cell, value) in merged.iter_mut().zip(series) {
                    *cell += value;
                }
            }
        }
        if found {
            self.columns.insert(into.to_string(), merged);
        }
    }
}

/// Build the month × category matrix for the `num_months` calendar months
/// ending at the month of the latest transaction
///
/// Transactions outside the window are ignored. An empty collection yields
/// an empty matrix.
pub fn aggregate_months(
    expenses: &[Transaction],
    level: CategoryLevel,
    num_months: usize,
) -> MonthMatrix {
    let Some(latest) = expenses.iter().map(|t| t.date).max() else {
        return MonthMatrix::empty();
    };

    let months = MonthKey::from_date(latest).trailing(num_months);
    let index: HashMap<MonthKey, usize> =
        months.iter().enumerate().map(|(i, m)| (*m, i)).collect();

    // Accumulate in cents so the dollar totals are exact
    let mut cents: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for txn in expenses {
        let Some(&slot) = index.get(&MonthKey::from_date(txn.date)) else {
            continue;
        };
        let series = cents
            .entry(txn.category(level).to_string())
            .or_insert_with(|| vec![0; months.len()]);
        series[slot] += txn.amount.cents();
    }

    let columns = cents
        .into_iter()
        .map(|(name, series)| {
            let dollars = series.into_iter().map(|c| c as f64 / 100.0).collect();
            (name, dollars)
        })
        .collect::<BTreeMap<_, _>>();

    debug!(
        months = months.len(),
        categories = columns.len(),
        level = %level,
        "aggregated monthly spending"
    );

    MonthMatrix { months, columns }
}

/// Default activity floor for a window: 10% of its length, rounded down
pub fn default_min_frequency(window_months: usize) -> usize {
    window_months / 10
}

/// Drop every category active in `min_frequency` months or fewer
///
/// Dropped spend is removed outright, not folded into a residual. Returns
/// the dropped category names.
pub fn prune_low_frequency(matrix: &mut MonthMatrix, min_frequency: usize) -> Vec<String> {
    let dropped: Vec<String> = matrix
        .categories()
        .filter(|name| matrix.active_months(name) <= min_frequency)
        .map(str::to_string)
        .collect();

    for name in &dropped {
        matrix.remove_column(name);
    }

    if !dropped.is_empty() {
        debug!(min_frequency, dropped = ?dropped, "pruned low-frequency categories");
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPath, Money};
    use chrono::NaiveDate;

    fn spend(y: i32, m: u32, d: u32, cents: i64, top: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Money::from_cents(cents),
            CategoryPath::new(format!("{} specific", top), format!("{} parent", top), top),
        )
    }

    #[test]
    fn test_matrix_shape_and_zero_fill() {
        let expenses = vec![
            spend(2025, 2, 10, 5000, "Food"),
            spend(2025, 2, 20, 2500, "Food"),
            spend(2025, 1, 5, 12000, "Rent"),
            spend(2024, 12, 1, 3000, "Food"),
        ];

        let matrix = aggregate_months(&expenses, CategoryLevel::Top, 4);
        assert_eq!(matrix.num_months(), 4);
        assert_eq!(matrix.labels(), vec!["11/24", "12/24", "1/25", "2/25"]);
        assert_eq!(matrix.column("Food").unwrap(), &[0.0, 30.0, 0.0, 75.0]);
        assert_eq!(matrix.column("Rent").unwrap(), &[0.0, 0.0, 120.0, 0.0]);
    }

    #[test]
    fn test_window_longer_than_history_is_zero_filled() {
        let expenses = vec![spend(2025, 3, 1, 1000, "Food")];
        let matrix = aggregate_months(&expenses, CategoryLevel::Top, 12);
        assert_eq!(matrix.num_months(), 12);
        let series = matrix.column("Food").unwrap();
        assert_eq!(series.iter().filter(|v| **v == 0.0).count(), 11);
        assert_eq!(series[11], 10.0);
    }

    #[test]
    fn test_labels_strictly_increase() {
        let expenses = vec![spend(2025, 1, 31, 100, "Food")];
        let matrix = aggregate_months(&expenses, CategoryLevel::Top, 14);
        assert!(matrix.months().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(matrix.months()[0], MonthKey::new(2023, 12).unwrap());
    }

    #[test]
    fn test_transactions_outside_window_are_ignored() {
        let expenses = vec![
            spend(2025, 3, 1, 1000, "Food"),
            spend(2024, 1, 1, 9999, "Travel"),
        ];
        let matrix = aggregate_months(&expenses, CategoryLevel::Top, 3);
        assert!(matrix.column("Travel").is_none());
    }

    #[test]
    fn test_aggregates_on_requested_level() {
        let expenses = vec![spend(2025, 3, 1, 1000, "Food")];
        let matrix = aggregate_months(&expenses, CategoryLevel::Parent, 1);
        assert!(matrix.column("Food parent").is_some());
    }

    #[test]
    fn test_empty_input() {
        let matrix = aggregate_months(&[], CategoryLevel::Top, 12);
        assert_eq!(matrix, MonthMatrix::empty());
    }

    #[test]
    fn test_row_and_merge() {
        let expenses = vec![
            spend(2025, 2, 1, 1000, "A"),
            spend(2025, 2, 1, 2000, "B"),
            spend(2025, 1, 1, 500, "C"),
        ];
        let mut matrix = aggregate_months(&expenses, CategoryLevel::Top, 2);
        let latest = matrix.row(1).unwrap();
        assert_eq!(latest.get("B"), Some(20.0));
        assert_eq!(latest.get("C"), Some(0.0));

        matrix.merge_columns(&["B", "C", "Missing"], "Misc.");
        assert!(matrix.column("B").is_none());
        assert_eq!(matrix.column("Misc.").unwrap(), &[5.0, 20.0]);
    }

    #[test]
    fn test_prune_drops_rare_categories() {
        let expenses = vec![
            spend(2025, 3, 1, 100, "Steady"),
            spend(2025, 2, 1, 100, "Steady"),
            spend(2025, 1, 1, 100, "Steady"),
            spend(2025, 3, 1, 100, "OneOff"),
        ];
        let mut matrix = aggregate_months(&expenses, CategoryLevel::Top, 12);
        let dropped = prune_low_frequency(&mut matrix, default_min_frequency(12));
        assert_eq!(dropped, vec!["OneOff"]);
        assert!(matrix.column("Steady").is_some());
    }

    #[test]
    fn test_prune_zero_keeps_any_activity() {
        let expenses = vec![spend(2025, 3, 1, 100, "OneOff")];
        let mut matrix = aggregate_months(&expenses, CategoryLevel::Top, 12);
        assert!(prune_low_frequency(&mut matrix, 0).is_empty());
        assert_eq!(matrix.num_categories(), 1);
    }

    #[test]
    fn test_prune_at_window_length_drops_everything() {
        let expenses: Vec<_> = (1..=3)
            .flat_map(|m| [spend(2025, m, 1, 100, "A"), spend(2025, m, 2, 100, "B")])
            .collect();
        let mut matrix = aggregate_months(&expenses, CategoryLevel::Top, 3);
        let dropped = prune_low_frequency(&mut matrix, 3);
        assert_eq!(dropped.len(), 2);
        assert_eq!(matrix.num_categories(), 0);
    }
}
