use crate::tui::components::dialogs::{Locale, OverlapPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language for default dialog titles and button labels
    pub locale: Locale,

    /// What happens to a dialog request made while another one is open
    pub overlap_policy: OverlapPolicy,

    /// Whether mouse clicks reach the dialog renderer
    pub mouse_enabled: bool,

    /// Default directory scanned by `talento migrate`
    pub source_root: PathBuf,

    /// Data directory for log files
    pub data_dir: PathBuf,

    /// Migration tool settings
    pub migration: MigrationConfig,
}

/// Settings for the alert/confirm migration tool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// File extensions to rewrite, with their leading dot
    pub extensions: Vec<String>,

    /// Directory names never descended into
    pub ignore_dirs: Vec<String>,

    /// File names never rewritten
    pub ignore_files: Vec<String>,

    /// Module the `useModal` hook is imported from
    pub import_path: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            extensions: [".tsx", ".ts", ".jsx", ".js"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_dirs: ["node_modules", ".next", "dist", "build", ".git"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_files: ["ModalContext.tsx", "ModalContext.ts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            import_path: "@/context/ModalContext".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            overlap_policy: OverlapPolicy::default(),
            mouse_enabled: true,
            source_root: PathBuf::from("./src"),
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("talento"))
                .unwrap_or_else(|| PathBuf::from("./data")),
            migration: MigrationConfig::default(),
        }
    }
}

impl Config {
    /// Initialize configuration from defaults, config files and the environment
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match Self::load_from_file(Path::new(".")).await {
            Ok(Some(file_config)) => file_config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Ignoring unreadable configuration file: {:#}", e);
                Self::default()
            }
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Configuration file candidates, in priority order
    pub fn config_paths(base: &Path) -> Vec<PathBuf> {
        let mut paths = vec![base.join(".talento.json"), base.join("talento.json")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("talento").join("talento.json"));
        }
        paths
    }

    /// Load the first configuration file found, if any
    pub async fn load_from_file(base: &Path) -> Result<Option<Self>> {
        for path in Self::config_paths(base) {
            if path.exists() {
                debug!("Loading configuration from: {}", path.display());
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: Self = serde_json::from_str(&content)
                    .with_context(|| format!("Invalid configuration in {}", path.display()))?;
                return Ok(Some(config));
            }
        }

        Ok(None)
    }

    /// Load configuration overrides from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply `TALENTO_*` overrides from an arbitrary lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup("TALENTO_LOCALE") {
            match locale.parse() {
                Ok(locale) => self.locale = locale,
                Err(e) => warn!("TALENTO_LOCALE: {}", e),
            }
        }

        if let Some(policy) = lookup("TALENTO_OVERLAP_POLICY") {
            match policy.parse() {
                Ok(policy) => self.overlap_policy = policy,
                Err(e) => warn!("TALENTO_OVERLAP_POLICY: {}", e),
            }
        }

        if let Some(mouse) = lookup("TALENTO_MOUSE") {
            self.mouse_enabled = mouse.to_lowercase() != "false" && mouse != "0";
        }

        if let Some(source_root) = lookup("TALENTO_SOURCE_ROOT") {
            self.source_root = PathBuf::from(source_root);
        }

        if let Some(data_dir) = lookup("TALENTO_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Make sure the data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).with_context(|| {
                format!("Failed to create data directory {}", self.data_dir.display())
            })?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.migration.extensions.is_empty() {
            return Err(anyhow::anyhow!("migration.extensions must not be empty"));
        }

        if let Some(ext) = self
            .migration
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2)
        {
            return Err(anyhow::anyhow!(
                "migration extension '{}' must start with a dot",
                ext
            ));
        }

        if self.migration.import_path.trim().is_empty() {
            return Err(anyhow::anyhow!("migration.import_path must not be empty"));
        }

        Ok(())
    }
}
