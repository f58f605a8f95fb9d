//! Residual-category trimming
//!
//! Folds low-value categories into one residual entry ("Misc." by default).
//! The residual is only created when the folded amount clears a second
//! floor; otherwise the folded amount is dropped and the total shrinks.

use tracing::debug;

use super::aggregate::MonthMatrix;
use crate::models::BudgetMap;

/// Default residual category name
pub const DEFAULT_RESIDUAL_NAME: &str = "Misc.";

/// A floor given in dollars or as a share of the total
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Absolute(f64),
    Fraction(f64),
}

impl Threshold {
    /// Values strictly between 0 and 1 are shares; anything else is dollars
    pub fn from_value(value: f64) -> Self {
        if value > 0.0 && value < 1.0 {
            Self::Fraction(value)
        } else {
            Self::Absolute(value)
        }
    }

    /// The dollar floor against a given total
    pub fn resolve(&self, total: f64) -> f64 {
        match *self {
            Self::Absolute(dollars) => dollars,
            Self::Fraction(share) => share * total,
        }
    }
}

impl From<f64> for Threshold {
    fn from(value: f64) -> Self {
        Self::from_value(value)
    }
}

/// Collapses entries under a floor into a residual category
#[derive(Debug, Clone)]
pub struct CategoryTrimmer {
    threshold: Threshold,
    residual_threshold: Threshold,
    residual_name: String,
}

impl CategoryTrimmer {
    /// Trim entries below `threshold`; the residual floor defaults to 0
    pub fn new(threshold: impl Into<Threshold>) -> Self {
        Self {
            threshold: threshold.into(),
            residual_threshold: Threshold::Absolute(0.0),
            residual_name: DEFAULT_RESIDUAL_NAME.to_string(),
        }
    }

    /// Set the floor the collapsed sum must exceed to become a residual entry
    pub fn with_residual_threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.residual_threshold = threshold.into();
        self
    }

    pub fn with_residual_name(mut self, name: impl Into<String>) -> Self {
        self.residual_name = name.into();
        self
    }

    pub fn residual_name(&self) -> &str {
        &self.residual_name
    }

    /// Trim in place, returning the collapsed category names
    pub fn trim(&self, entries: &mut BudgetMap) -> Vec<String> {
        let total = entries.total();
        let floor = self.threshold.resolve(total);
        let residual_floor = self.residual_threshold.resolve(total);

        let collapsed: Vec<String> = entries
            .iter()
            .filter(|(_, value)| *value < floor)
            .map(|(name, _)| name.to_string())
            .collect();

        let mut collapsed_sum = 0.0;
        for name in &collapsed {
            collapsed_sum += entries.remove(name).unwrap_or(0.0);
        }

        if collapsed_sum > residual_floor {
            entries.insert(self.residual_name.clone(), collapsed_sum);
        } else if !collapsed.is_empty() {
            debug!(
                discarded = collapsed_sum,
                residual_floor, "collapsed amount under residual floor was dropped"
            );
        }

        collapsed
    }

    /// Trim a copy, leaving the input untouched
    pub fn trimmed(&self, entries: &BudgetMap) -> (BudgetMap, Vec<String>) {
        let mut copy = entries.clone();
        let collapsed = self.trim(&mut copy);
        (copy, collapsed)
    }

    /// Trim one month's row of a month × category matrix
    pub fn trim_row(&self, matrix: &MonthMatrix, index: usize) -> Option<(BudgetMap, Vec<String>)> {
        let mut row = matrix.row(index)?;
        let collapsed = self.trim(&mut row);
        Some((row, collapsed))
    }
}
