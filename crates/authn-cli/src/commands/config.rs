//! Configuration inspection commands.

use clap::{Args, Subcommand};

use authn_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Load and validate the configuration
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;

    match &args.command {
        ConfigCommand::Show => output::print_item(&config, format),
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration for '{env}' is valid."))
        }
    }

    Ok(())
}
