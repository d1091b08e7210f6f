//! Configuration management for the decision-tree engine.
//!
//! Strongly-typed configuration structures that map to `config.toml`.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults, missing sections keep them)
//! 3. `RUST_LOG` (overrides `logging.level` when set)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [metrics]
//! kinds = ["health", "food"]
//!
//! [pool]
//! prune_released = true
//!
//! [logging]
//! level = "info"
//! ```

use protista_data::MetricSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The metric kinds every tree node tracks.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MetricsConfig {
    pub kinds: Vec<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            kinds: vec!["health".to_string(), "food".to_string()],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PoolConfig {
    /// Drop a pooled tree once its last organism releases it.
    pub prune_released: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            prune_released: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level engine configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub metrics: MetricsConfig,
    pub pool: PoolConfig,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.metrics.kinds.is_empty(),
            "At least one metric kind is required"
        );
        let mut seen = HashSet::new();
        for kind in &self.metrics.kinds {
            anyhow::ensure!(!kind.trim().is_empty(), "Metric kinds must not be blank");
            anyhow::ensure!(seen.insert(kind.as_str()), "Duplicate metric kind '{}'", kind);
        }

        anyhow::ensure!(
            LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()),
            "Log level must be one of {:?}",
            LOG_LEVELS
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The metric domain shared by every node built under this configuration.
    #[must_use]
    pub fn metric_set(&self) -> MetricSet {
        MetricSet::new(self.metrics.kinds.iter().map(String::as_str))
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.metrics).as_bytes());
        hasher.update(format!("{:?}", self.pool).as_bytes());
        hex::encode(hasher.finalize())
    }
}
