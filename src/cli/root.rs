use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

use super::migrate::MigrateCommand;
use crate::config::Config;
use crate::{init_logging, tui, LogTarget};

/// talento - promise-based modal dialogs for the terminal, plus a migration tool
#[derive(Parser, Debug)]
#[command(
    name = "talento",
    version,
    about = "Promise-based modal dialogs for the terminal, plus an alert()/confirm() migration tool",
    long_about = r#"talento shows awaitable alert, confirm, success, error and warning dialogs
in a terminal UI, and ships a tool that migrates native alert()/confirm() calls in a
JS/TS project to the useModal dialog API.

Examples:
  talento                               # Start the interactive dialog demo
  talento migrate --dry-run             # Report what would change under ./src
  talento migrate --path ./app          # Rewrite call sites under ./app
  talento --cwd /path/to/project        # Set working directory"#
)]
pub struct Cli {
    /// Current working directory
    #[arg(short = 'c', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate native alert()/confirm() calls to useModal
    Migrate(MigrateCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        // Change working directory if specified
        if let Some(cwd) = &self.cwd {
            std::env::set_current_dir(cwd)
                .with_context(|| format!("Failed to change directory to {}", cwd.display()))?;
        }

        // Initialize configuration
        let config = Config::init().await?;

        match self.command {
            Some(Commands::Migrate(ref migrate_cmd)) => {
                init_logging(self.debug, LogTarget::Stderr)?;
                debug!("Configuration initialized");
                migrate_cmd.execute(&config).await
            }
            None => {
                // Logs would tear the alternate screen, send them to a file
                config.ensure_data_dir()?;
                init_logging(self.debug, LogTarget::File(config.data_dir.join("talento.log")))?;
                self.start_interactive_mode(config).await
            }
        }
    }

    async fn start_interactive_mode(&self, config: Config) -> Result<()> {
        info!("Starting interactive mode");
        tui::run(config).await?;
        info!("Application finished");
        Ok(())
    }
}
