//! Configuration module
//!
//! Settings come from a TOML file, `~/.config/rental-service/config.toml`
//! by default. Missing sections fall back to their defaults, so an empty
//! file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::assembly::AssemblyOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config location, `~/.config/rental-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rental-service")
        .join("config.toml")
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub assembly: AssemblyConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter used when RUST_LOG is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Assembly diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Warn on each row dropped during assembly
    pub log_dropped_rows: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            log_dropped_rows: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the given TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Path from the `RENTAL_CONFIG` environment variable, or the default.
    pub fn path_from_env() -> PathBuf {
        std::env::var("RENTAL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path())
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            log_dropped_rows: self.assembly.log_dropped_rows,
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
pub fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}

// ── Tests ──────────────────────────────────────────────────────
