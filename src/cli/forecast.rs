//! Forecast CLI command
//!
//! Forecasts next month's budget from a transactions file, optionally
//! carving out a monthly savings goal.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::{load_session, open_output, write_report, OutputFormat};
use crate::config::{Settings, MAX_WINDOW_MONTHS};
use crate::display::{format_plan, format_warnings};
use crate::error::{BudgetError, BudgetResult};
use crate::export::{BudgetReport, ReportKind};
use crate::models::{CategoryLevel, Money, WarningLevel};
use crate::services::plan_budget;

/// Arguments for `budgetcast forecast`
#[derive(Debug, Args)]
pub struct ForecastArgs {
    /// Transactions CSV file
    pub file: PathBuf,

    /// Only use transactions from this account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Monthly savings goal (e.g., "250" or "$250.00")
    #[arg(short = 'g', long)]
    pub savings_goal: Option<String>,

    /// Trailing months to forecast from (defaults to the configured window)
    #[arg(short, long)]
    pub months: Option<usize>,

    /// Category level to budget on: specific, parent or top
    #[arg(short, long)]
    pub level: Option<CategoryLevel>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse a savings goal, rejecting negative amounts
fn parse_goal(raw: &str) -> BudgetResult<f64> {
    let goal = Money::parse(raw).map_err(|e| {
        BudgetError::invalid_argument(format!("savings goal '{}': {}", raw, e))
    })?;
    if goal.is_negative() {
        return Err(BudgetError::invalid_argument(format!(
            "savings goal must not be negative, got {}",
            goal
        )));
    }
    Ok(goal.to_dollars())
}

fn check_months(months: usize) -> BudgetResult<()> {
    if months == 0 || months > MAX_WINDOW_MONTHS {
        return Err(BudgetError::invalid_argument(format!(
            "--months must be between 1 and {}, got {}",
            MAX_WINDOW_MONTHS, months
        )));
    }
    Ok(())
}

/// Handle the forecast command
pub fn handle_forecast_command(settings: &Settings, args: ForecastArgs) -> BudgetResult<WarningLevel> {
    let goal = args.savings_goal.as_deref().map(parse_goal).transpose()?;
    if let Some(months) = args.months {
        check_months(months)?;
    }

    let mut session = load_session(&args.file, args.account.as_deref(), settings)?;
    if let Some(months) = args.months {
        session = session.with_window(months);
    }
    if let Some(level) = args.level {
        session = session.with_category_level(level);
    }

    let outcome = plan_budget(&session, settings, goal)?;
    eprint!("{}", format_warnings(&outcome.warnings));

    let mut writer = open_output(args.output.as_deref())?;
    match (&outcome.value, args.format) {
        (Some(plan), OutputFormat::Table) => {
            write!(writer, "{}", format_plan(plan, &settings.currency_symbol))?;
        }
        (None, OutputFormat::Table) => {}
        (Some(plan), format) => {
            let report = BudgetReport::from_plan(plan, &outcome.warnings);
            write_report(&report, format, &mut writer)?;
        }
        (None, format) => {
            let report = BudgetReport::fatal(ReportKind::Forecast, &outcome.warnings);
            write_report(&report, format, &mut writer)?;
        }
    }
    writer.flush()?;

    Ok(outcome.level())
}
