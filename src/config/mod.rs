//! Configuration module for budgetcast
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Tunable forecasting settings

pub mod paths;
pub mod settings;

pub use paths::BudgetcastPaths;
pub use settings::{Settings, MAX_WINDOW_MONTHS};
