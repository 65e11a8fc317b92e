use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::migrate::AlertMigrator;

/// Rewrite native alert()/confirm() calls into useModal dialog calls
#[derive(Args, Debug)]
pub struct MigrateCommand {
    /// Only report the changes, do not write any file
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Directory to process (defaults to the configured source root, ./src)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,
}

impl MigrateCommand {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        let root = self
            .path
            .clone()
            .unwrap_or_else(|| config.source_root.clone());
        debug!("Executing migrate command on {}", root.display());

        let migrator = AlertMigrator::with_config(&root, self.dry_run, &config.migration)
            .context("Invalid migration settings")?;

        // The walk is blocking file I/O
        let report = tokio::task::spawn_blocking(move || migrator.run())
            .await
            .context("Migration task failed")?
            .with_context(|| format!("Migration of {} failed", root.display()))?;

        println!("{}", report);
        Ok(())
    }
}
