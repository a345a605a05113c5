//! Configuration loading for drive-status
//!
//! Configuration is loaded from:
//! 1. The `--config` command line option
//! 2. Environment variable DRIVE_STATUS_CONFIG
//! 3. ~/.config/drive-status/config.toml
//! 4. Default values
//!
//! DRIVE_STATUS_K8S_UNITS overrides `display.k8s_units` in every case.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::capacity::CapacityThresholds;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output formatting
    #[serde(default)]
    pub display: DisplayConfig,
    /// Capacity level thresholds
    #[serde(default)]
    pub thresholds: CapacityThresholds,
}

/// Output formatting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use Kubernetes suffixes (Gi) instead of binary units (GiB)
    #[serde(default)]
    pub k8s_units: bool,
    /// Keep one decimal place in sizes
    #[serde(default = "default_true")]
    pub show_decimals: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            k8s_units: false,
            show_decimals: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// An explicit path takes priority over the search order above and must
    /// exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit.map(Path::to_path_buf).or_else(Self::find_config_path) {
            Some(path) if explicit.is_some() || path.exists() => Self::load_from(&path)?,
            Some(path) => {
                tracing::debug!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::debug!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(std::env::var("DRIVE_STATUS_K8S_UNITS").ok().as_deref());
        config.validate()?;

        Ok(config)
    }

    /// Parse a specific TOML file
    ///
    /// The result is not validated; [`Config::load`] checks it once the
    /// environment overrides are applied.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply environment overrides
    fn apply_overrides(&mut self, k8s_units: Option<&str>) {
        if let Some(value) = k8s_units {
            self.display.k8s_units =
                matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    /// Check that the thresholds describe a usable range
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("warning_percent", t.warning_percent),
            ("critical_percent", t.critical_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                bail!("thresholds.{} must be between 0 and 100, got {}", name, value);
            }
        }
        if t.warning_percent > t.critical_percent {
            bail!(
                "thresholds.warning_percent ({}) must not exceed thresholds.critical_percent ({})",
                t.warning_percent,
                t.critical_percent
            );
        }
        Ok(())
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("DRIVE_STATUS_CONFIG") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.config/drive-status/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home)
                .join(".config")
                .join("drive-status")
                .join("config.toml");
            return Some(path);
        }

        None
    }
}
