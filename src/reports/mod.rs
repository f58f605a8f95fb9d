//! Reports module for budgetcast
//!
//! Chart-feeding summaries over a session: spending breakdown (pie), daily
//! money flow (line), and the recent activity list.

pub mod activity;
pub mod money_flow;
pub mod spending;

pub use activity::{ActivityEntry, ActivityFeed};
pub use money_flow::{DailyFlow, MoneyFlow};
pub use spending::{CategoryShare, SpendingBreakdown};
