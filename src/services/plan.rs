//! Forecast-then-allocate pipeline
//!
//! Runs the forecaster and, when a savings goal is given, the allocator on
//! the forecast it produced. Warnings from both stages land in one
//! accumulator whose level only escalates.

use serde::Serialize;

use super::forecast::{BudgetForecast, BudgetForecaster};
use super::savings::{SavingsAllocator, SavingsPlan};
use crate::config::Settings;
use crate::error::BudgetResult;
use crate::models::{BudgetMap, Outcome, UserSession};

/// A forecast plus the savings adjustment applied to it, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPlan {
    pub forecast: BudgetForecast,
    pub savings: Option<SavingsPlan>,
}

impl BudgetPlan {
    /// The budget to present: savings-adjusted when a goal was applied
    pub fn budget(&self) -> &BudgetMap {
        self.savings
            .as_ref()
            .map(|plan| &plan.budget)
            .unwrap_or(&self.forecast.budget)
    }
}

/// Forecast next month and optionally carve out a savings goal
pub fn plan_budget(
    session: &UserSession,
    settings: &Settings,
    savings_goal: Option<f64>,
) -> BudgetResult<Outcome<BudgetPlan>> {
    let Outcome {
        value,
        mut warnings,
    } = BudgetForecaster::new(settings).forecast(session);
    let Some(forecast) = value else {
        return Ok(Outcome::fatal(warnings));
    };

    let Some(goal) = savings_goal else {
        return Ok(Outcome::ok(
            BudgetPlan {
                forecast,
                savings: None,
            },
            warnings,
        ));
    };

    let allocation = SavingsAllocator::new(settings).allocate(session, &forecast, goal)?;
    warnings.merge(allocation.warnings);
    match allocation.value {
        Some(plan) => Ok(Outcome::ok(
            BudgetPlan {
                forecast,
                savings: Some(plan),
            },
            warnings,
        )),
        None => Ok(Outcome::fatal(warnings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPath, Money, Transaction, WarningLevel};
    use chrono::{Datelike, NaiveDate};

    /// Twelve months of steady rent and swinging dining, 20 rows a month
    fn history() -> Vec<Transaction> {
        let mut txns = Vec::new();
        for month in 1..=12u32 {
            let rent_day = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
            txns.push(Transaction::new(
                rent_day,
                Money::from_cents(150_000),
                CategoryPath::new("Rent", "Housing", "Home"),
            ));
            let dining = if month % 2 == 0 { 4_000 } else { 1_000 };
            for day in 2..=20u32 {
                txns.push(Transaction::new(
                    NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
                    Money::from_cents(dining),
                    CategoryPath::new("Restaurants", "Dining", "Food"),
                ));
            }
        }
        txns
    }

    #[test]
    fn test_forecast_only() {
        let settings = Settings::default();
        let outcome = plan_budget(&UserSession::new(history()), &settings, None).unwrap();

        assert_eq!(outcome.level(), WarningLevel::None);
        let plan = outcome.value.unwrap();
        assert!(plan.savings.is_none());
        assert_eq!(plan.budget(), &plan.forecast.budget);
    }

    #[test]
    fn test_goal_is_taken_from_the_variable_category() {
        let settings = Settings::default();
        let outcome = plan_budget(&UserSession::new(history()), &settings, Some(50.0)).unwrap();
        let plan = outcome.value.unwrap();
        let savings = plan.savings.as_ref().unwrap();

        assert_eq!(savings.discretionary, vec!["Food"]);
        assert_eq!(
            plan.budget().get("Food").unwrap(),
            plan.forecast.budget.get("Food").unwrap() - 50.0
        );
        assert_eq!(plan.budget().get("Home"), plan.forecast.budget.get("Home"));
    }

    #[test]
    fn test_warnings_from_both_stages_merge() {
        // 24 rows: the forecast warns on count, the allocator on the goal size
        let txns: Vec<Transaction> = history()
            .into_iter()
            .filter(|t| t.category.top == "Home" || t.date.day0() == 1)
            .collect();
        assert!(txns.len() < 100);

        let settings = Settings::default();
        let session = UserSession::new(txns);
        let total = BudgetForecaster::new(&settings)
            .forecast(&session)
            .value
            .unwrap()
            .budget
            .total();

        let outcome = plan_budget(&session, &settings, Some((total * 0.5).floor())).unwrap();
        assert_eq!(outcome.level(), WarningLevel::NonFatal);
        assert_eq!(outcome.warnings.messages().len(), 2);
        assert!(outcome.value.is_some());
    }

    #[test]
    fn test_unreachable_goal_is_fatal() {
        let settings = Settings::default();
        let outcome =
            plan_budget(&UserSession::new(history()), &settings, Some(1_000_000.0)).unwrap();
        assert!(outcome.is_fatal());
    }

    #[test]
    fn test_fatal_forecast_skips_allocation() {
        let settings = Settings::default();
        let txns = history().into_iter().take(5).collect();
        let outcome = plan_budget(&UserSession::new(txns), &settings, Some(-1.0)).unwrap();
        assert!(outcome.is_fatal());
        assert_eq!(outcome.warnings.messages().len(), 1);
    }
}
