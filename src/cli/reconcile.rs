//! Reconcile CLI command
//!
//! Summarizes one month's spending against the categories of the budget.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::{load_session, open_output, write_report, OutputFormat};
use crate::config::Settings;
use crate::display::{format_reconciliation, format_warnings};
use crate::error::BudgetResult;
use crate::export::BudgetReport;
use crate::models::{MonthKey, WarningLevel, Warnings};
use crate::services::{BudgetForecaster, MonthReconciler, MonthTarget, ReconcileOptions};

/// Arguments for `budgetcast reconcile`
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Transactions CSV file
    pub file: PathBuf,

    /// Only use transactions from this account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Reconcile the current calendar month instead of the latest month with spending
    #[arg(long, conflicts_with = "month")]
    pub current: bool,

    /// Reconcile a specific month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<MonthKey>,

    /// Only count spending up to this day of the month
    #[arg(short, long)]
    pub day: Option<u32>,

    /// Categories always shown, even with no spending (defaults to the forecast's categories)
    #[arg(long = "fixed", value_name = "CATEGORY")]
    pub fixed: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ReconcileArgs {
    fn target(&self) -> MonthTarget {
        match (self.current, self.month) {
            (_, Some(month)) => MonthTarget::Month(month),
            (true, None) => MonthTarget::Current,
            (false, None) => MonthTarget::Latest,
        }
    }
}

/// Handle the reconcile command
pub fn handle_reconcile_command(settings: &Settings, args: ReconcileArgs) -> BudgetResult<WarningLevel> {
    let session = load_session(&args.file, args.account.as_deref(), settings)?;
    let mut warnings = Warnings::new();

    let fixed = if args.fixed.is_empty() {
        let forecast = BudgetForecaster::new(settings).forecast(&session);
        match forecast.value {
            Some(forecast) => forecast.categories(),
            None => {
                // No budget to anchor on; keep the messages but don't fail the month
                for message in forecast.warnings.messages() {
                    warnings.non_fatal(message.clone());
                }
                Vec::new()
            }
        }
    } else {
        args.fixed.clone()
    };

    let mut options = ReconcileOptions::new(fixed).with_target(args.target());
    if let Some(day) = args.day {
        options = options.with_day_cutoff(day);
    }

    let reconciliation = MonthReconciler::new(settings).reconcile(&session, &options)?;
    eprint!("{}", format_warnings(&warnings));

    let mut writer = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Table => {
            write!(
                writer,
                "{}",
                format_reconciliation(&reconciliation, &settings.currency_symbol)
            )?;
        }
        format => {
            let report = BudgetReport::from_reconciliation(&reconciliation, &warnings);
            write_report(&report, format, &mut writer)?;
        }
    }
    writer.flush()?;

    Ok(warnings.level())
}
