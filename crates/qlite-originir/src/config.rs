//! Emitter configuration.
//!
//! Settings come from, highest precedence first:
//! 1. Environment variables (`QLITE_ORIGINIR_` prefix)
//! 2. A YAML configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Largest number of fractional digits an `f64` can meaningfully carry.
pub const MAX_PRECISION: usize = 17;

/// OriginIR output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Fractional digits printed for angles
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Emit the `QINIT` / `CREG` header
    #[serde(default = "default_true")]
    pub header: bool,

    /// Emit `BARRIER` lines; when off, barriers are dropped
    #[serde(default = "default_true")]
    pub barriers: bool,

    /// Emit custom gates as their upper-cased name instead of failing
    #[serde(default)]
    pub custom_gates: bool,
}

fn default_precision() -> usize {
    6
}

fn default_true() -> bool {
    true
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            header: true,
            barriers: true,
            custom_gates: false,
        }
    }
}

impl EmitterConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: EmitterConfig =
            serde_yaml_ng::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Apply `QLITE_ORIGINIR_*` environment overrides.
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QLITE_ORIGINIR_PRECISION") {
            if let Ok(val) = v.parse() {
                self.precision = val;
            }
        }
        if let Some(v) = lookup("QLITE_ORIGINIR_HEADER") {
            if let Some(val) = parse_flag(&v) {
                self.header = val;
            }
        }
        if let Some(v) = lookup("QLITE_ORIGINIR_BARRIERS") {
            if let Some(val) = parse_flag(&v) {
                self.barriers = val;
            }
        }
        if let Some(v) = lookup("QLITE_ORIGINIR_CUSTOM_GATES") {
            if let Some(val) = parse_flag(&v) {
                self.custom_gates = val;
            }
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(ConfigError::ValidationError(format!(
                "precision must be between 1 and {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The YAML text is malformed or has wrong field types.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A setting is out of range.
    #[error("Validation error: {0}")]
    ValidationError(String),
}
