//! Core data models for budgetcast
//!
//! Transactions and their category hierarchy, calendar months, budget maps,
//! warning accumulation, and the per-request user session.

pub mod budget;
pub mod category;
pub mod money;
pub mod period;
pub mod session;
pub mod transaction;
pub mod warning;

pub use budget::BudgetMap;
pub use category::{CategoryLevel, CategoryPath};
pub use money::{round_cents, round_dollars, Money};
pub use period::{MonthKey, TimePeriod};
pub use session::UserSession;
pub use transaction::Transaction;
pub use warning::{Outcome, WarningLevel, Warnings};
