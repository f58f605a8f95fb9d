//! budgetcast - budget forecasting from transaction history
//!
//! This library turns a user's categorized transactions into a forecast
//! budget for the coming month, optionally deducts a savings goal from the
//! most variable categories, and reconciles a month's actual spending
//! against the budgeted categories.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, months, budgets, warnings)
//! - `services`: Windowing, aggregation, trimming, forecasting, savings and reconciliation
//! - `reports`: Spending breakdown, money flow and activity reports
//! - `display`: Terminal rendering
//! - `export`: JSON, YAML and CSV report output
//! - `cli`: Command handlers for the `budgetcast` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetcast::config::Settings;
//! use budgetcast::models::UserSession;
//! use budgetcast::services::plan_budget;
//!
//! let settings = Settings::default();
//! let session = UserSession::from_settings(transactions, &settings);
//! let outcome = plan_budget(&session, &settings, Some(200.0))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{BudgetError, BudgetResult};
