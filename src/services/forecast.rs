//! Budget forecasting
//!
//! Gates the session on data sufficiency, builds the monthly matrix, drops
//! rarely active categories, and forecasts next month per category with
//! simple exponential smoothing at a fixed coefficient. Small categories are
//! then folded into the residual category.

use serde::Serialize;
use tracing::debug;

use super::aggregate::{aggregate_months, default_min_frequency, prune_low_frequency};
use super::trim::{CategoryTrimmer, Threshold};
use crate::config::Settings;
use crate::models::{round_dollars, BudgetMap, CategoryLevel, Outcome, UserSession, Warnings};

/// A forecast budget plus what the savings step needs to reproduce its
/// category partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetForecast {
    /// Whole-dollar forecast per category, residual included
    pub budget: BudgetMap,
    /// Categories folded into the residual entry
    pub collapsed: Vec<String>,
    /// Categories dropped for being active too rarely
    pub pruned: Vec<String>,
    /// Sum of per-category forecasts before trimming
    pub forecast_total: f64,
    pub window_months: usize,
    pub category_level: CategoryLevel,
    pub residual_name: String,
}

impl BudgetForecast {
    /// Budgeted category names, residual included
    pub fn categories(&self) -> Vec<String> {
        self.budget.categories().map(str::to_string).collect()
    }
}

/// One-step-ahead simple exponential smoothing forecast
///
/// The level starts at the first observation and is updated with
/// `level = alpha * y + (1 - alpha) * level` for each later observation.
pub fn exponential_smoothing_forecast(series: &[f64], alpha: f64) -> Option<f64> {
    let (first, rest) = series.split_first()?;
    Some(
        rest.iter()
            .fold(*first, |level, y| alpha * y + (1.0 - alpha) * level),
    )
}

/// Produces next month's budget from a session's expense history
pub struct BudgetForecaster<'a> {
    settings: &'a Settings,
}

impl<'a> BudgetForecaster<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Run the transaction-count and history-span checks
    ///
    /// Stops at the first fatal finding.
    pub fn check_data(&self, session: &UserSession) -> Warnings {
        let mut warnings = Warnings::new();
        let count = session.expenses().len();

        if count < self.settings.min_transactions {
            warnings.fatal(format!(
                "Only {} expense transactions found; at least {} are needed to forecast a budget.",
                count, self.settings.min_transactions
            ));
            return warnings;
        }
        if count < self.settings.advisory_transactions {
            warnings.non_fatal(format!(
                "Only {} expense transactions found; forecasts built on fewer than {} may be unreliable.",
                count, self.settings.advisory_transactions
            ));
        }

        let span_days = session
            .expense_span()
            .map(|(first, last)| (last - first).num_days())
            .unwrap_or(0);

        if span_days < self.settings.min_history_days {
            warnings.fatal(format!(
                "Only {} days of spending history found; at least {} are needed to forecast a budget.",
                span_days, self.settings.min_history_days
            ));
        } else if span_days < self.settings.advisory_history_days {
            warnings.non_fatal(format!(
                "Only {} days of spending history found; forecasts built on fewer than {} may be unreliable.",
                span_days, self.settings.advisory_history_days
            ));
        }

        warnings
    }

    /// Forecast next month's spend per category
    pub fn forecast(&self, session: &UserSession) -> Outcome<BudgetForecast> {
        let warnings = self.check_data(session);
        if warnings.is_fatal() {
            debug!(messages = ?warnings.messages(), "forecast rejected");
            return Outcome::fatal(warnings);
        }

        let window = session.past_months_window();
        let level = session.category_level();

        let mut matrix = aggregate_months(session.expenses(), level, window);
        let pruned = prune_low_frequency(&mut matrix, default_min_frequency(window));

        let mut budget = BudgetMap::new();
        let mut forecast_total = 0.0;
        for (category, series) in matrix.columns() {
            let Some(next) = exponential_smoothing_forecast(series, self.settings.smoothing_level)
            else {
                continue;
            };
            let next = round_dollars(next);
            forecast_total += next;
            budget.insert(category, next);
        }

        let trimmer = CategoryTrimmer::new(Threshold::Fraction(self.settings.forecast_trim_fraction))
            .with_residual_name(self.settings.residual_name.clone());
        let collapsed = trimmer.trim(&mut budget);

        debug!(
            categories = budget.len(),
            collapsed = collapsed.len(),
            pruned = pruned.len(),
            forecast_total,
            "forecast complete"
        );

        Outcome::ok(
            BudgetForecast {
                budget,
                collapsed,
                pruned,
                forecast_total,
                window_months: window,
                category_level: level,
                residual_name: self.settings.residual_name.clone(),
            },
            warnings,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPath, Money, Transaction, WarningLevel};
    use chrono::{Duration, NaiveDate};

    fn spend(date: NaiveDate, dollars: i64, top: &str) -> Transaction {
        Transaction::new(date, Money::from_cents(dollars * 100), CategoryPath::flat(top))
    }

    /// `count` transactions spread evenly across `span_days` ending 2025-06-30
    fn evenly_spread(count: usize, span_days: i64) -> Vec<Transaction> {
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        (0..count)
            .map(|i| {
                let offset = if count > 1 {
                    span_days * i as i64 / (count as i64 - 1)
                } else {
                    0
                };
                spend(end - Duration::days(span_days - offset), 50, "Food")
            })
            .collect()
    }

    #[test]
    fn test_smoothing_formula() {
        assert_eq!(exponential_smoothing_forecast(&[], 0.6), None);
        assert_eq!(exponential_smoothing_forecast(&[100.0], 0.6), Some(100.0));

        // 100 -> 0.6*200 + 0.4*100 = 160 -> 0.6*100 + 0.4*160 = 124
        let next = exponential_smoothing_forecast(&[100.0, 200.0, 100.0], 0.6).unwrap();
        assert!((next - 124.0).abs() < 1e-9);
    }

    #[test]
    fn test_nine_transactions_is_fatal() {
        let settings = Settings::default();
        let session = UserSession::new(evenly_spread(9, 200));
        let outcome = BudgetForecaster::new(&settings).forecast(&session);

        assert!(outcome.is_fatal());
        assert_eq!(outcome.level(), WarningLevel::Fatal);
        assert_eq!(outcome.warnings.messages().len(), 1);
    }

    #[test]
    fn test_ten_transactions_produces_budget() {
        let settings = Settings::default();
        let session = UserSession::new(evenly_spread(10, 200));
        let outcome = BudgetForecaster::new(&settings).forecast(&session);

        assert!(!outcome.is_fatal());
        assert_eq!(outcome.level(), WarningLevel::NonFatal);
        assert!(outcome.value.is_some());
    }

    #[test]
    fn test_short_history_is_fatal() {
        let settings = Settings::default();
        let session = UserSession::new(evenly_spread(150, 59));
        let outcome = BudgetForecaster::new(&settings).forecast(&session);

        assert!(outcome.is_fatal());
        assert_eq!(outcome.warnings.messages().len(), 1);
        assert!(outcome.warnings.messages()[0].contains("59 days"));
    }

    #[test]
    fn test_medium_history_warns() {
        let settings = Settings::default();
        let session = UserSession::new(evenly_spread(150, 120));
        let outcome = BudgetForecaster::new(&settings).forecast(&session);

        assert!(!outcome.is_fatal());
        assert_eq!(outcome.level(), WarningLevel::NonFatal);
        assert_eq!(outcome.warnings.messages().len(), 1);
    }

    #[test]
    fn test_ample_data_has_no_warnings() {
        let settings = Settings::default();
        let session = UserSession::new(evenly_spread(200, 360));
        let outcome = BudgetForecaster::new(&settings).forecast(&session);

        assert_eq!(outcome.level(), WarningLevel::None);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_forecast_values_and_residual() {
        // Monthly history Jan..Jun 2025: Rent flat, Food rising, Gifts tiny,
        // Travel only once (pruned with a 12-month window).
        let mut txns = Vec::new();
        for month in 1..=6u32 {
            let day = NaiveDate::from_ymd_opt(2025, month, 10).unwrap();
            txns.push(spend(day, 1000, "Rent"));
            txns.push(spend(day, 100 * month as i64, "Food"));
            txns.push(spend(day, 10, "Gifts"));
        }
        txns.push(spend(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(), 900, "Travel"));

        let settings = Settings::default();
        let session = UserSession::new(txns);
        let forecast = BudgetForecaster::new(&settings)
            .forecast(&session)
            .value
            .unwrap();

        assert_eq!(forecast.pruned, vec!["Travel"]);
        assert_eq!(forecast.collapsed, vec!["Gifts"]);
        assert_eq!(forecast.window_months, 12);

        // Six leading zero months pull every series down from a level of 0
        let zeros = [0.0; 6];
        let rent: Vec<f64> = zeros.iter().copied().chain([1000.0; 6]).collect();
        let expected_rent = round_dollars(exponential_smoothing_forecast(&rent, 0.6).unwrap());
        assert_eq!(forecast.budget.get("Rent"), Some(expected_rent));

        let gifts: Vec<f64> = zeros.iter().copied().chain([10.0; 6]).collect();
        let expected_gifts = round_dollars(exponential_smoothing_forecast(&gifts, 0.6).unwrap());
        assert_eq!(forecast.budget.get("Misc."), Some(expected_gifts));
        assert!(!forecast.budget.contains("Gifts"));
        assert!(forecast.budget.iter().all(|(_, v)| v.fract() == 0.0));
    }

    #[test]
    fn test_window_and_level_come_from_session() {
        let mut txns = Vec::new();
        for month in 1..=6u32 {
            let day = NaiveDate::from_ymd_opt(2025, month, 10).unwrap();
            txns.push(Transaction::new(
                day,
                Money::from_cents(5000),
                CategoryPath::new("Coffee Shops", "Restaurants", "Food"),
            ));
            txns.push(Transaction::new(
                day,
                Money::from_cents(5000),
                CategoryPath::new("Supermarkets", "Groceries", "Food"),
            ));
        }

        let settings = Settings::default();
        let session = UserSession::new(txns)
            .with_window(6)
            .with_category_level(CategoryLevel::Parent);
        let forecast = BudgetForecaster::new(&settings)
            .forecast(&session)
            .value
            .unwrap();

        assert_eq!(forecast.category_level, CategoryLevel::Parent);
        assert_eq!(forecast.budget.get("Restaurants"), Some(50.0));
        assert_eq!(forecast.budget.get("Groceries"), Some(50.0));
    }
}
