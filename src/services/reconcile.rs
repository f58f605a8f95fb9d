//! Month reconciliation
//!
//! Compares one month's actual spending against a fixed category list. Every
//! fixed category appears in the result, zero when nothing was spent on it;
//! small transient categories fold into the residual entry.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use serde::Serialize;
use tracing::debug;

use super::trim::{CategoryTrimmer, Threshold};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{round_cents, BudgetMap, MonthKey, UserSession};

/// Which month to reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthTarget {
    /// The real current calendar month
    Current,
    /// The month of the most recent expense
    #[default]
    Latest,
    /// An explicit month
    Month(MonthKey),
}

impl MonthTarget {
    /// Resolve to a concrete month for a session
    ///
    /// `Latest` on a session without expenses falls back to the current month.
    pub fn resolve(&self, session: &UserSession) -> MonthKey {
        match self {
            Self::Current => MonthKey::current(),
            Self::Latest => session
                .latest_expense_date()
                .map(MonthKey::from_date)
                .unwrap_or_else(MonthKey::current),
            Self::Month(month) => *month,
        }
    }
}

/// What to reconcile and against which categories
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Categories that always appear in the result
    pub fixed: Vec<String>,
    pub target: MonthTarget,
    /// Only count days of the month up to and including this one
    pub day_cutoff: Option<u32>,
}

impl ReconcileOptions {
    pub fn new(fixed: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fixed: fixed.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: MonthTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_day_cutoff(mut self, day: u32) -> Self {
        self.day_cutoff = Some(day);
        self
    }

    fn validate(&self) -> BudgetResult<()> {
        match self.day_cutoff {
            Some(day) if !(1..=31).contains(&day) => Err(BudgetError::invalid_argument(format!(
                "day cutoff must be in 1..=31, got {}",
                day
            ))),
            _ => Ok(()),
        }
    }
}

/// One month's spending laid against the fixed categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub month: MonthKey,
    /// Spend per category to the cent, every fixed category included
    pub budget: BudgetMap,
    /// Transient categories folded into the residual entry
    pub collapsed: Vec<String>,
    /// Month total before trimming
    pub month_total: f64,
    pub day_cutoff: Option<u32>,
}

/// Reconciles one month of actual spending
pub struct MonthReconciler<'a> {
    settings: &'a Settings,
}

impl<'a> MonthReconciler<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Sum the target month per category and fold in the fixed list
    pub fn reconcile(
        &self,
        session: &UserSession,
        options: &ReconcileOptions,
    ) -> BudgetResult<Reconciliation> {
        options.validate()?;

        let month = options.target.resolve(session);
        let level = session.category_level();

        let mut cents: BTreeMap<&str, i64> = BTreeMap::new();
        for txn in session.expenses() {
            if !month.contains(txn.date) {
                continue;
            }
            if options.day_cutoff.is_some_and(|day| txn.date.day() > day) {
                continue;
            }
            *cents.entry(txn.category(level)).or_insert(0) += txn.amount.cents();
        }

        let actual: BudgetMap = cents
            .into_iter()
            .map(|(name, c)| (name, round_cents(c as f64 / 100.0)))
            .collect();
        let month_total = actual.total();

        let fixed: HashSet<&str> = options.fixed.iter().map(String::as_str).collect();
        let mut kept = BudgetMap::new();
        let mut transient = BudgetMap::new();
        for (name, value) in actual.iter() {
            if fixed.contains(name) {
                kept.insert(name, value);
            } else {
                transient.insert(name, value);
            }
        }

        let floor = self.settings.reconcile_trim_fraction * month_total;
        let collapsed = CategoryTrimmer::new(Threshold::Absolute(floor))
            .with_residual_name(self.settings.residual_name.clone())
            .trim(&mut transient);

        // A residual may share its name with a fixed category; amounts add up
        for (name, value) in transient {
            kept.add(name, value);
        }
        for name in &options.fixed {
            if !kept.contains(name) {
                kept.insert(name.as_str(), 0.0);
            }
        }
        kept.map_values(round_cents);

        debug!(
            month = %month,
            categories = kept.len(),
            collapsed = collapsed.len(),
            month_total,
            "reconciled month"
        );

        Ok(Reconciliation {
            month,
            budget: kept,
            collapsed,
            month_total,
            day_cutoff: options.day_cutoff,
        })
    }
}
