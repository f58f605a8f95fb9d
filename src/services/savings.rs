//! Savings allocation
//!
//! Carves a monthly savings goal out of a forecast budget. The categories
//! whose monthly spend swings the most are treated as discretionary, and the
//! goal is spread across them in proportion to their standard deviation.

use serde::Serialize;
use tracing::debug;

use super::aggregate::aggregate_months;
use super::forecast::BudgetForecast;
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{round_dollars, BudgetMap, Money, Outcome, UserSession, Warnings};

/// A budget after the savings goal has been deducted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    /// The adjusted budget
    pub budget: BudgetMap,
    /// Whole-dollar deduction per discretionary category
    pub deductions: BudgetMap,
    /// Discretionary categories, most variable first
    pub discretionary: Vec<String>,
    pub goal: f64,
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two points
pub fn sample_std_dev(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    let sum_sq: f64 = series.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}

/// Deducts a savings goal from a forecast budget
pub struct SavingsAllocator<'a> {
    settings: &'a Settings,
}

impl<'a> SavingsAllocator<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Spread `goal` dollars across the most variable budget categories
    ///
    /// `session` must be the session the forecast was built from. Fails
    /// only for a negative or non-finite goal; an unreachable goal is a
    /// fatal warning.
    pub fn allocate(
        &self,
        session: &UserSession,
        forecast: &BudgetForecast,
        goal: f64,
    ) -> BudgetResult<Outcome<SavingsPlan>> {
        if !goal.is_finite() || goal < 0.0 {
            return Err(BudgetError::invalid_argument(format!(
                "savings goal must be a non-negative amount, got {}",
                goal
            )));
        }

        let mut warnings = Warnings::new();
        let total = forecast.budget.total();

        if goal > total {
            warnings.fatal(format!(
                "The savings goal of {} exceeds the total forecast budget of {}.",
                Money::from_dollars(goal),
                Money::from_dollars(total)
            ));
            return Ok(Outcome::fatal(warnings));
        }
        if goal > self.settings.savings_warning_fraction * total {
            warnings.non_fatal(format!(
                "The savings goal of {} is more than {:.0}% of the total forecast budget of {}; it may be hard to reach.",
                Money::from_dollars(goal),
                self.settings.savings_warning_fraction * 100.0,
                Money::from_dollars(total)
            ));
        }

        let mut budget = forecast.budget.clone();
        if goal == 0.0 || budget.is_empty() {
            return Ok(Outcome::ok(
                SavingsPlan {
                    budget,
                    deductions: BudgetMap::new(),
                    discretionary: Vec::new(),
                    goal,
                },
                warnings,
            ));
        }

        // Same partition as the forecast: collapsed categories become the residual
        let mut matrix =
            aggregate_months(session.expenses(), forecast.category_level, forecast.window_months);
        matrix.merge_columns(&forecast.collapsed, &forecast.residual_name);

        let mut ranked: Vec<(String, f64)> = budget
            .categories()
            .map(|name| {
                let spread = matrix.column(name).map(sample_std_dev).unwrap_or(0.0);
                (name.to_string(), spread)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut take = ranked.len().div_ceil(2);
        let covered = |take: usize| -> f64 {
            ranked[..take]
                .iter()
                .map(|(name, _)| budget.get(name).unwrap_or(0.0))
                .sum()
        };
        while covered(take) < goal && take < ranked.len() {
            take += 1;
        }
        let selected = &ranked[..take];

        let spread_sum: f64 = selected.iter().map(|(_, s)| s).sum();
        let budget_sum: f64 = covered(take);

        let mut deductions = BudgetMap::new();
        for (name, spread) in selected {
            let weight = if spread_sum > 0.0 {
                spread / spread_sum
            } else if budget_sum > 0.0 {
                budget.get(name).unwrap_or(0.0) / budget_sum
            } else {
                1.0 / selected.len() as f64
            };
            deductions.insert(name.as_str(), round_dollars(goal * weight));
        }

        for (name, deduction) in deductions.iter() {
            if let Some(value) = budget.get_mut(name) {
                *value -= deduction;
            }
        }

        let discretionary: Vec<String> = selected.iter().map(|(name, _)| name.clone()).collect();
        debug!(
            goal,
            discretionary = ?discretionary,
            deducted = deductions.total(),
            "allocated savings goal"
        );

        Ok(Outcome::ok(
            SavingsPlan {
                budget,
                deductions,
                discretionary,
                goal,
            },
            warnings,
        ))
    }
}
