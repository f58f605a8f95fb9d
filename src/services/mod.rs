//! Service layer for budgetcast
//!
//! The forecasting engine: windowing, monthly aggregation, trimming and
//! pruning, forecasting, savings allocation, and month reconciliation, plus
//! the sources transactions are read from.

pub mod aggregate;
pub mod forecast;
pub mod import;
pub mod plan;
pub mod reconcile;
pub mod savings;
pub mod trim;
pub mod window;

pub use aggregate::{aggregate_months, default_min_frequency, prune_low_frequency, MonthMatrix};
pub use forecast::{exponential_smoothing_forecast, BudgetForecast, BudgetForecaster};
pub use import::{CsvTransactionSource, InMemorySource, TransactionSource};
pub use plan::{plan_budget, BudgetPlan};
pub use reconcile::{MonthReconciler, MonthTarget, ReconcileOptions, Reconciliation};
pub use savings::{sample_std_dev, SavingsAllocator, SavingsPlan};
pub use trim::{CategoryTrimmer, Threshold, DEFAULT_RESIDUAL_NAME};
pub use window::{filter_by_period, filter_by_tag};
