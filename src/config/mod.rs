//! Typed configuration.
//!
//! Loaded from environment variables or from a TOML file. Every setting has
//! a default; only malformed values are errors.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Work units per `process` slice when nothing else is configured.
pub const DEFAULT_WORK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Work units handed to a bag per `process` call.
    pub work_size: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_size: DEFAULT_WORK_SIZE,
            log_level: "info".to_string(),
        }
    }
}

/// Top-level TOML layout.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    log_level: Option<String>,
    #[serde(default)]
    processor: ProcessorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcessorSection {
    work_size: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `GLB_WORK_SIZE` and `LOG_LEVEL` are both optional. In local dev, call
    /// `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let work_size = match std::env::var("GLB_WORK_SIZE") {
            Ok(raw) => parse_work_size(&raw)?,
            Err(_) => defaults.work_size,
        };
        Ok(Self {
            work_size,
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Load configuration from a TOML file.
    ///
    /// ```toml
    /// log_level = "debug"
    ///
    /// [processor]
    /// work_size = 250
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read config {}: {e}", path.display())))?;
        Self::from_toml(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("bad config {}: {msg}", path.display())),
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        let defaults = Self::default();
        let work_size = match file.processor.work_size {
            Some(0) => return Err(Error::Config("work_size must be positive".to_string())),
            Some(n) => n,
            None => defaults.work_size,
        };
        Ok(Self {
            work_size,
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }
}

fn parse_work_size(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(Error::Config(format!(
            "GLB_WORK_SIZE must be a positive integer, got {raw:?}"
        ))),
        Ok(n) => Ok(n),
    }
}
