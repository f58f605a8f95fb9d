//! Config CLI commands
//!
//! Shows the active settings and writes a settings file to edit.

use clap::Subcommand;

use crate::config::{BudgetcastPaths, Settings};
use crate::error::BudgetResult;
use crate::models::WarningLevel;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the config directory and the active settings
    Show,

    /// Write the active settings to the config directory
    Init,
}

/// Handle config commands
pub fn handle_config_command(
    paths: &BudgetcastPaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> BudgetResult<WarningLevel> {
    match cmd {
        ConfigCommands::Show => {
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            if !paths.is_initialized() {
                println!("(not initialized, using defaults)");
            }
            println!();
            println!("{}", serde_json::to_string_pretty(settings)?);
        }

        ConfigCommands::Init => {
            settings.save(paths)?;
            println!("Wrote settings to {}", paths.settings_file().display());
        }
    }

    Ok(WarningLevel::None)
}
