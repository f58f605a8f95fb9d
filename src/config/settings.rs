//! Tunable settings for budgetcast
//!
//! Every threshold the engine applies lives here so a deployment can tune
//! them without a rebuild. Defaults reproduce the stock forecasting rules.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::paths::BudgetcastPaths;
use crate::error::BudgetError;
use crate::models::CategoryLevel;

/// Longest forecast window accepted, in months
pub const MAX_WINDOW_MONTHS: usize = 600;

/// User settings for budgetcast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Trailing calendar months fed to the forecast
    #[serde(default = "default_past_months_window")]
    pub past_months_window: usize,

    /// Hierarchy level that budgets are aggregated on
    #[serde(default)]
    pub category_level: CategoryLevel,

    /// Smoothing coefficient for the exponential-smoothing forecast
    #[serde(default = "default_smoothing_level")]
    pub smoothing_level: f64,

    /// Below this many expense transactions no forecast is produced
    #[serde(default = "default_min_transactions")]
    pub min_transactions: usize,

    /// Below this many expense transactions the forecast carries a warning
    #[serde(default = "default_advisory_transactions")]
    pub advisory_transactions: usize,

    /// Below this many days of history no forecast is produced
    #[serde(default = "default_min_history_days")]
    pub min_history_days: i64,

    /// Below this many days of history the forecast carries a warning
    #[serde(default = "default_advisory_history_days")]
    pub advisory_history_days: i64,

    /// Share of the total forecast under which a category folds into the residual
    #[serde(default = "default_forecast_trim_fraction")]
    pub forecast_trim_fraction: f64,

    /// Share of the total budget above which a savings goal is flagged
    #[serde(default = "default_savings_warning_fraction")]
    pub savings_warning_fraction: f64,

    /// Share of the month's spend under which a transient category folds away
    #[serde(default = "default_reconcile_trim_fraction")]
    pub reconcile_trim_fraction: f64,

    /// Name of the synthetic residual category
    #[serde(default = "default_residual_name")]
    pub residual_name: String,

    /// Top-level category excluded from expenses
    #[serde(default = "default_transfer_category")]
    pub transfer_category: String,

    /// Share of transaction count at or under which a spending slice is relabelled
    #[serde(default = "default_spending_share_floor")]
    pub spending_share_floor: f64,

    /// Label for relabelled spending slices
    #[serde(default = "default_other_label")]
    pub other_label: String,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_past_months_window() -> usize {
    12
}

fn default_smoothing_level() -> f64 {
    0.6
}

fn default_min_transactions() -> usize {
    10
}

fn default_advisory_transactions() -> usize {
    100
}

fn default_min_history_days() -> i64 {
    60
}

fn default_advisory_history_days() -> i64 {
    180
}

fn default_forecast_trim_fraction() -> f64 {
    0.05
}

fn default_savings_warning_fraction() -> f64 {
    0.3
}

fn default_reconcile_trim_fraction() -> f64 {
    0.03
}

fn default_residual_name() -> String {
    "Misc.".to_string()
}

fn default_transfer_category() -> String {
    "Transfers".to_string()
}

fn default_spending_share_floor() -> f64 {
    0.05
}

fn default_other_label() -> String {
    "Other".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            past_months_window: default_past_months_window(),
            category_level: CategoryLevel::default(),
            smoothing_level: default_smoothing_level(),
            min_transactions: default_min_transactions(),
            advisory_transactions: default_advisory_transactions(),
            min_history_days: default_min_history_days(),
            advisory_history_days: default_advisory_history_days(),
            forecast_trim_fraction: default_forecast_trim_fraction(),
            savings_warning_fraction: default_savings_warning_fraction(),
            reconcile_trim_fraction: default_reconcile_trim_fraction(),
            residual_name: default_residual_name(),
            transfer_category: default_transfer_category(),
            spending_share_floor: default_spending_share_floor(),
            other_label: default_other_label(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or defaults if no file exists
    pub fn load_or_create(paths: &BudgetcastPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            Self::load_from(&settings_path)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, BudgetError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetcastPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.past_months_window == 0 || self.past_months_window > MAX_WINDOW_MONTHS {
            return Err(BudgetError::Config(format!(
                "past_months_window must be between 1 and {}, got {}",
                MAX_WINDOW_MONTHS, self.past_months_window
            )));
        }
        if !(self.smoothing_level > 0.0 && self.smoothing_level <= 1.0) {
            return Err(BudgetError::Config(format!(
                "smoothing_level must be in (0, 1], got {}",
                self.smoothing_level
            )));
        }
        if self.advisory_transactions < self.min_transactions {
            return Err(BudgetError::Config(
                "advisory_transactions must not be below min_transactions".into(),
            ));
        }
        if self.advisory_history_days < self.min_history_days {
            return Err(BudgetError::Config(
                "advisory_history_days must not be below min_history_days".into(),
            ));
        }
        for (name, value) in [
            ("forecast_trim_fraction", self.forecast_trim_fraction),
            ("savings_warning_fraction", self.savings_warning_fraction),
            ("reconcile_trim_fraction", self.reconcile_trim_fraction),
            ("spending_share_floor", self.spending_share_floor),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(BudgetError::Config(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }
        if self.residual_name.trim().is_empty() {
            return Err(BudgetError::Config("residual_name must not be empty".into()));
        }
        Ok(())
    }
}
