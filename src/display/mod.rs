//! Display formatting for terminal output
//!
//! Provides table views for budgets and reconciliations, and the small
//! formatting helpers they share.

pub mod budget;
pub mod format;

pub use budget::{format_budget_table, format_plan, format_reconciliation, format_warnings};
