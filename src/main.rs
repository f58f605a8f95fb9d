use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use budgetcast::cli::{
    handle_config_command, handle_forecast_command, handle_reconcile_command,
    handle_report_command, ConfigCommands, ForecastArgs, ReconcileArgs, ReportCommands,
};
use budgetcast::config::{BudgetcastPaths, Settings};
use budgetcast::models::WarningLevel;

/// Exit status when a command finished with a fatal data-quality warning
const FATAL_EXIT_CODE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "budgetcast",
    version,
    about = "Forecast next month's budget from transaction history",
    long_about = "budgetcast reads a transaction history, forecasts a monthly \
                  budget per category, carves out a savings goal from the \
                  most variable spending, and reconciles a month against it."
)]
struct Cli {
    /// Settings file to use instead of the config directory
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a budget for next month
    Forecast(ForecastArgs),

    /// Summarize a month's spending by budget category
    Reconcile(ReconcileArgs),

    /// Spending, money flow and activity reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = BudgetcastPaths::new()?;
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load_or_create(&paths)?,
    };
    debug!(config_dir = %paths.base_dir().display(), "settings loaded");

    let level = match cli.command {
        Commands::Forecast(args) => handle_forecast_command(&settings, args)?,
        Commands::Reconcile(args) => handle_reconcile_command(&settings, args)?,
        Commands::Report(cmd) => handle_report_command(&settings, cmd)?,
        Commands::Config(cmd) => handle_config_command(&paths, &settings, cmd)?,
    };

    if level == WarningLevel::Fatal {
        eprintln!("Not enough data to produce a budget.");
        std::process::exit(FATAL_EXIT_CODE);
    }

    Ok(())
}
