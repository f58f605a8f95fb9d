//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer. Handlers return the worst
//! warning level they hit so the binary can pick an exit status.

pub mod config;
pub mod forecast;
pub mod reconcile;
pub mod report;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_report_csv, export_report_json, export_report_yaml, BudgetReport};
use crate::models::{Transaction, UserSession};
use crate::services::{CsvTransactionSource, TransactionSource};

pub use config::{handle_config_command, ConfigCommands};
pub use forecast::{handle_forecast_command, ForecastArgs};
pub use reconcile::{handle_reconcile_command, ReconcileArgs};
pub use report::{handle_report_command, ReportCommands};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

/// Load a CSV file into a session configured from settings
///
/// With an account filter, an account with no rows is an error.
pub fn load_session(
    file: &Path,
    account: Option<&str>,
    settings: &Settings,
) -> BudgetResult<UserSession> {
    let mut transactions = CsvTransactionSource::new(file).transactions()?;

    if let Some(account) = account {
        transactions.retain(|t: &Transaction| t.account_id == account);
        if transactions.is_empty() {
            return Err(BudgetError::account_not_found(account));
        }
    }

    Ok(UserSession::from_settings(transactions, settings))
}

/// Write to a file when a path is given, otherwise to stdout
pub fn open_output(path: Option<&Path>) -> BudgetResult<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write a budget report in a machine-readable format
///
/// `Table` is rendered by the caller and is not handled here.
pub fn write_report<W: Write>(
    report: &BudgetReport,
    format: OutputFormat,
    writer: &mut W,
) -> BudgetResult<()> {
    match format {
        OutputFormat::Json => export_report_json(report, writer, true),
        OutputFormat::Yaml => export_report_yaml(report, writer),
        OutputFormat::Csv => export_report_csv(report, writer),
        OutputFormat::Table => Err(BudgetError::invalid_argument(
            "table output is rendered by the command, not exported",
        )),
    }
}
