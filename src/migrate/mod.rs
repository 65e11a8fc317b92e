//! Migration of native `alert`/`confirm` calls to the dialog API
//!
//! Walks a JS/TS source tree and rewrites call sites in place. A dry run
//! reports what would change without writing anything.

pub mod patterns;
pub mod rewrite;

pub use rewrite::{Rewrite, SourceRewriter};

use crate::config::MigrationConfig;
use crate::utils::fs::{walk_files, WalkConfig};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Source directory does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid import path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type MigrateResult<T> = Result<T, MigrateError>;

/// Counters collected over a migration run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStats {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub imports_added: usize,
    pub hooks_added: usize,
    pub alerts_replaced: usize,
    pub confirms_replaced: usize,
    pub handlers_made_async: usize,
    /// Read, write and walk failures that did not stop the run
    pub errors: Vec<String>,
}

impl MigrationStats {
    fn record(&mut self, rewrite: &Rewrite) {
        self.files_modified += 1;
        self.imports_added += rewrite.import_added as usize;
        self.hooks_added += rewrite.hook_added as usize;
        self.alerts_replaced += rewrite.alerts_replaced;
        self.confirms_replaced += rewrite.confirms_replaced;
        self.handlers_made_async += rewrite.handlers_made_async;
    }
}

/// What changed in one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub notes: Vec<String>,
}

/// Outcome of a migration run
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub stats: MigrationStats,
    pub changes: Vec<FileChange>,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "═".repeat(60);
        let stats = &self.stats;

        writeln!(f, "{}", rule)?;
        writeln!(f, "Migration summary for {}", self.root.display())?;
        writeln!(f)?;
        writeln!(f, "  Files scanned:        {}", stats.files_scanned)?;
        writeln!(f, "  Files modified:       {}", stats.files_modified)?;
        writeln!(f, "  Imports added:        {}", stats.imports_added)?;
        writeln!(f, "  Hooks added:          {}", stats.hooks_added)?;
        writeln!(f, "  alert() replaced:     {}", stats.alerts_replaced)?;
        writeln!(f, "  confirm() replaced:   {}", stats.confirms_replaced)?;
        writeln!(f, "  Handlers made async:  {}", stats.handlers_made_async)?;

        if !stats.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "  Errors: {}", stats.errors.len())?;
            for error in &stats.errors {
                writeln!(f, "    - {}", error)?;
            }
        }

        if self.dry_run {
            writeln!(f)?;
            writeln!(f, "  DRY RUN: no files were written")?;
            writeln!(f, "  Run again without --dry-run to apply the changes")?;
        }
        writeln!(f, "{}", rule)?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Modified files:")?;
            for change in &self.changes {
                writeln!(f, "  {}", change.path.display())?;
                for note in &change.notes {
                    writeln!(f, "    {}", note)?;
                }
            }
        }

        Ok(())
    }
}

/// Walks a source tree and rewrites native dialog calls
pub struct AlertMigrator {
    root: PathBuf,
    dry_run: bool,
    walk: WalkConfig,
    rewriter: SourceRewriter,
}

impl AlertMigrator {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> MigrateResult<Self> {
        Self::with_config(root, dry_run, &MigrationConfig::default())
    }

    pub fn with_config(
        root: impl Into<PathBuf>,
        dry_run: bool,
        config: &MigrationConfig,
    ) -> MigrateResult<Self> {
        let walk = WalkConfig {
            ignore_dirs: config.ignore_dirs.clone(),
            ignore_files: config.ignore_files.clone(),
            include_extensions: config.extensions.clone(),
            ..Default::default()
        };

        Ok(Self {
            root: root.into(),
            dry_run,
            walk,
            rewriter: SourceRewriter::new(&config.import_path)?,
        })
    }

    /// Run the migration over the whole tree
    pub fn run(&self) -> MigrateResult<MigrationReport> {
        if !self.root.is_dir() {
            return Err(MigrateError::MissingRoot(self.root.clone()));
        }

        info!(
            "Migrating {} ({})",
            self.root.display(),
            if self.dry_run { "dry run" } else { "applying changes" }
        );

        let mut stats = MigrationStats::default();
        let mut changes = Vec::new();

        for entry in walk_files(&self.root, &self.walk) {
            let file = match entry {
                Ok(file) => file,
                Err(e) if e.depth() == 0 => return Err(MigrateError::Walk(e)),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    stats.errors.push(e.to_string());
                    continue;
                }
            };

            match self.process_file(&file.path, &mut stats) {
                Ok(Some(change)) => changes.push(change),
                Ok(None) => {}
                Err(e) => {
                    warn!("{}", e);
                    stats.errors.push(e.to_string());
                }
            }
        }

        info!(
            "Migration finished: {} of {} files modified",
            stats.files_modified, stats.files_scanned
        );

        Ok(MigrationReport {
            root: self.root.clone(),
            dry_run: self.dry_run,
            stats,
            changes,
        })
    }

    /// Rewrite one file, writing it back unless this is a dry run
    fn process_file(
        &self,
        path: &Path,
        stats: &mut MigrationStats,
    ) -> MigrateResult<Option<FileChange>> {
        stats.files_scanned += 1;

        let source = std::fs::read_to_string(path).map_err(|source| MigrateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(rewrite) = self.rewriter.rewrite(&source) else {
            return Ok(None);
        };
        if rewrite.content == source {
            debug!("Nothing to change in {}", path.display());
            return Ok(None);
        }

        debug!("Rewriting {}: {:?}", path.display(), rewrite.notes());
        if !self.dry_run {
            std::fs::write(path, &rewrite.content).map_err(|source| MigrateError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        stats.record(&rewrite);

        Ok(Some(FileChange {
            path: path.to_path_buf(),
            notes: rewrite.notes(),
        }))
    }
}
