//! Configuration management for the probe target list.
//!
//! Stores configuration in JSON format at `~/.bannergrab/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::{Target, DEFAULT_PORT};
use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Targets probed when none are given on the command line.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    /// Connect and read bound in seconds.
    #[serde(default = "default_timeout_secs", rename = "timeoutSecs")]
    pub timeout_secs: u64,

    /// Port used for targets written without one.
    #[serde(default = "default_port", rename = "defaultPort")]
    pub default_port: u16,
}

fn default_targets() -> Vec<String> {
    vec!["192.168.0.148:21".to_string(), "127.0.0.1:21".to_string()]
}

fn default_timeout_secs() -> u64 {
    3
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            timeout_secs: default_timeout_secs(),
            default_port: default_port(),
        }
    }
}

impl Config {
    /// The probe bound as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the configured target strings.
    ///
    /// Entries that do not parse are handed back separately so one bad
    /// line cannot hide the rest of the list.
    pub fn parsed_targets(&self) -> (Vec<Target>, Vec<(String, Error)>) {
        Target::parse_all(self.targets.iter().map(String::as_str), self.default_port)
    }

    /// Check values that would make every probe fail.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "timeoutSecs must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration store for the target list and probe settings.
///
/// Handles reading and writing configuration to `~/.bannergrab/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.bannergrab/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
        let config_path = home.join(".bannergrab").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the configuration file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir).await.map_err(|e| {
                    Error::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        debug!(path = %self.config_path.display(), "Config saved");
        Ok(())
    }

    /// Get the configured targets, parsed.
    ///
    /// Malformed entries are logged and skipped.
    pub async fn get_targets(&self) -> Result<Vec<Target>> {
        let (targets, rejected) = self.load().await?.parsed_targets();
        for (entry, e) in &rejected {
            warn!(entry = %entry, error = %e, "Skipping configured target");
        }
        Ok(targets)
    }

    /// Add a target to the list.
    ///
    /// The target is validated and stored in its canonical `host:port` form.
    pub async fn add_target(&self, target: &str) -> Result<Target> {
        let mut config = self.load().await?;
        let target = Target::parse(target, config.default_port)?;

        if config.parsed_targets().0.contains(&target) {
            return Err(Error::Config(format!(
                "Target {} is already configured",
                target
            )));
        }

        config.targets.push(target.to_string());
        self.save(&config).await?;
        Ok(target)
    }

    /// Remove a target from the list.
    pub async fn remove_target(&self, target: &str) -> Result<()> {
        let mut config = self.load().await?;
        let target = Target::parse(target, config.default_port)?;
        let default_port = config.default_port;

        let before = config.targets.len();
        config
            .targets
            .retain(|t| Target::parse(t, default_port).map_or(true, |parsed| parsed != target));

        if config.targets.len() == before {
            return Err(Error::Config(format!("Target {} is not configured", target)));
        }
        self.save(&config).await
    }

    /// Set the probe bound in seconds.
    pub async fn set_timeout(&self, secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(Error::Config("Timeout must be at least 1 second".to_string()));
        }
        let mut config = self.load().await?;
        config.timeout_secs = secs;
        self.save(&config).await
    }
}
