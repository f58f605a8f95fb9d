//! Report CLI commands
//!
//! Implements CLI commands for the spending breakdown, daily money flow and
//! recent activity feed.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;

use super::{load_session, open_output, OutputFormat};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryLevel, TimePeriod, WarningLevel};
use crate::reports::{ActivityFeed, MoneyFlow, SpendingBreakdown};

/// Options shared by every report
#[derive(Debug, Args)]
pub struct ReportSource {
    /// Transactions CSV file
    pub file: PathBuf,

    /// Only use transactions from this account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending per category, with small categories grouped together
    Spending {
        #[command(flatten)]
        source: ReportSource,

        /// Trailing period: day, week, month, year or all
        #[arg(short, long)]
        period: Option<TimePeriod>,

        /// Category level to group by: specific, parent or top
        #[arg(short, long)]
        level: Option<CategoryLevel>,
    },

    /// Net money flow for every day of the history
    Flow {
        #[command(flatten)]
        source: ReportSource,
    },

    /// Most recent transactions, newest first
    Activity {
        #[command(flatten)]
        source: ReportSource,

        /// Maximum number of entries to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Category level to label entries with: specific, parent or top
        #[arg(short, long, default_value_t = CategoryLevel::Specific)]
        level: CategoryLevel,
    },
}

/// A report that can be rendered in each output format
trait Report: Serialize {
    fn format_terminal(&self) -> String;
    fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()>;
}

impl Report for SpendingBreakdown {
    fn format_terminal(&self) -> String {
        SpendingBreakdown::format_terminal(self)
    }

    fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        SpendingBreakdown::export_csv(self, writer)
    }
}

impl Report for MoneyFlow {
    fn format_terminal(&self) -> String {
        MoneyFlow::format_terminal(self)
    }

    fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        MoneyFlow::export_csv(self, writer)
    }
}

impl Report for ActivityFeed {
    fn format_terminal(&self) -> String {
        ActivityFeed::format_terminal(self)
    }

    fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        ActivityFeed::export_csv(self, writer)
    }
}

fn emit<R: Report>(report: &R, source: &ReportSource) -> BudgetResult<()> {
    let mut writer = open_output(source.output.as_deref())?;
    match source.format {
        OutputFormat::Table => write!(writer, "{}", report.format_terminal())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)
                .map_err(|e| BudgetError::Export(e.to_string()))?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => {
            serde_yaml::to_writer(&mut writer, report)
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
        OutputFormat::Csv => report.export_csv(&mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Handle report commands
pub fn handle_report_command(settings: &Settings, cmd: ReportCommands) -> BudgetResult<WarningLevel> {
    match cmd {
        ReportCommands::Spending {
            source,
            period,
            level,
        } => {
            let session = load_session(&source.file, source.account.as_deref(), settings)?;
            let level = level.unwrap_or(settings.category_level);
            let report = match period {
                Some(period) => {
                    SpendingBreakdown::generate_for_period(&session, level, period, settings)
                }
                None => SpendingBreakdown::generate(&session, level, settings),
            };
            emit(&report, &source)?;
        }

        ReportCommands::Flow { source } => {
            let session = load_session(&source.file, source.account.as_deref(), settings)?;
            emit(&MoneyFlow::generate(&session), &source)?;
        }

        ReportCommands::Activity {
            source,
            limit,
            level,
        } => {
            let session = load_session(&source.file, source.account.as_deref(), settings)?;
            emit(&ActivityFeed::generate_at_level(&session, level, limit), &source)?;
        }
    }

    Ok(WarningLevel::None)
}
