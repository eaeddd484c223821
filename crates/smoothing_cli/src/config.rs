//! CLI configuration management.
//!
//! Loads synthesis settings from a TOML file, applies `GAUSSWALK_*`
//! environment variable overrides, and converts the result into a validated
//! [`WalkConfig`]. A missing file is not an error: the reference plot
//! settings are used instead.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use smoothing_core::math::gaussian::FilterSpec;
use smoothing_walk::config::{
    default_chain, DEFAULT_JITTER_DIVISOR, DEFAULT_RAMP_STEPS, DEFAULT_STEPS_PER_UNIT,
    REFERENCE_TOTAL_STEPS, REFERENCE_WIDTH,
};
use smoothing_walk::{SynthesisError, WalkConfig};

/// Environment variable overriding `width`.
pub const ENV_WIDTH: &str = "GAUSSWALK_WIDTH";
/// Environment variable overriding `total_steps`.
pub const ENV_STEPS: &str = "GAUSSWALK_STEPS";
/// Environment variable overriding `seed`.
pub const ENV_SEED: &str = "GAUSSWALK_SEED";
/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "GAUSSWALK_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Configuration file parse error: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for environment variable {name}")]
    Env { name: &'static str, value: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Verbosity of the `gausswalk` diagnostics written to stderr
///
/// Parsed case-insensitively from the `log_level` key or
/// `GAUSSWALK_LOG_LEVEL`. Used as the fallback filter when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-stage filter events
    Trace,
    /// Kernel bank construction and run summaries
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Every level, most verbose first
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_filter_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::InvalidLogLevel(s.to_string()))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Origin of a loaded [`CliConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was absent; built-in defaults apply
    Defaults(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded from {}", path.display()),
            ConfigSource::Defaults(path) => {
                write!(f, "{} not found, using defaults", path.display())
            }
        }
    }
}

/// File-level synthesis configuration
///
/// Every key is optional; absent keys take the reference plot values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Bound of the noisy axis
    pub width: f64,
    /// Sequence length
    pub total_steps: usize,
    /// Samples per time unit
    pub steps_per_unit: f64,
    /// Ramp-in window in samples
    pub ramp_steps: usize,
    /// Jitter divisor
    pub jitter_divisor: f64,
    /// Intermediate stages to emit (default selection when absent)
    pub emit_stages: Option<Vec<usize>>,
    /// Seed for reproducible output
    pub seed: Option<u64>,
    /// Log level
    pub log_level: LogLevel,
    /// Filter chain
    pub filters: Vec<FilterSpec>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            total_steps: REFERENCE_TOTAL_STEPS,
            steps_per_unit: DEFAULT_STEPS_PER_UNIT,
            ramp_steps: DEFAULT_RAMP_STEPS,
            jitter_divisor: DEFAULT_JITTER_DIVISOR,
            emit_stages: None,
            seed: None,
            log_level: LogLevel::default(),
            filters: default_chain(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `path`, or return defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// As [`CliConfig::load_or_default`], also reporting where the values came from
    ///
    /// Nothing is logged here; the caller reports the source once logging is up.
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())))
        }
    }

    /// Apply `GAUSSWALK_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_WIDTH) {
            self.width = parse_env(ENV_WIDTH, &value)?;
        }
        if let Some(value) = lookup(ENV_STEPS) {
            self.total_steps = parse_env(ENV_STEPS, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, &value)?);
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&value)?;
        }
        Ok(self)
    }

    /// Build the validated synthesis configuration
    pub fn to_walk_config(&self) -> Result<WalkConfig, SynthesisError> {
        let mut builder = WalkConfig::builder()
            .width(self.width)
            .total_steps(self.total_steps)
            .steps_per_unit(self.steps_per_unit)
            .ramp_steps(self.ramp_steps)
            .jitter_divisor(self.jitter_divisor)
            .filters(self.filters.clone());

        if let Some(stages) = &self.emit_stages {
            builder = builder.emit_stages(stages.clone());
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }

        builder.build()
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Env {
        name,
        value: value.to_string(),
    })
}
