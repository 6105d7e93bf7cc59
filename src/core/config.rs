//! Configuration management for degree-window
//!
//! Settings come from defaults, then an optional TOML file, then `DW_*`
//! environment variables, then command line flags (applied by the binary).

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file picked up by [`Config::load`] when present
pub const DEFAULT_CONFIG_FILE: &str = "degree-window.toml";

/// Smallest clock advance between dataset-shaped edges
pub const DATASET_MIN_GAP: i64 = 100;

/// Largest clock advance between dataset-shaped edges
pub const DATASET_MAX_GAP: i64 = 500;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window expiration policy parameters
    pub decay: DecayConfig,

    /// Edge stream source
    pub stream: StreamConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Tuning parameters of the window expiration policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Degree-weight exponent
    pub alpha: f64,

    /// Base amplitude of the expiration (two days in seconds)
    pub lambda_base: f64,

    /// Decay rate
    pub gamma: f64,

    /// Sensitivity of the amplitude correction
    pub beta: f64,

    /// Reach of an amplitude correction
    pub lambda_scope: LambdaScope,
}

/// How far an amplitude correction reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LambdaScope {
    /// Every assignment starts from `lambda_base`; a correction lasts for that edge only
    #[default]
    PerEdge,
    /// One amplitude shared by every window; corrections compound across the stream
    Global,
    /// Each window carries its own amplitude seeded from `lambda_base`
    PerWindow,
}

/// Edge stream configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Edge file to read (None = synthetic stream)
    pub input: Option<PathBuf>,

    /// Shape of the synthetic stream
    pub generator: GeneratorKind,

    /// Number of synthetic edges
    pub edges: usize,

    /// Largest synthetic vertex number
    pub max_vertex: u64,

    /// Number of distinct labels in the dataset-shaped stream
    pub labels: u64,

    /// RNG seed (None = seeded from the OS)
    pub seed: Option<u64>,

    /// Timestamp of the first synthetic edge
    pub start_time: i64,

    /// Largest per-edge timestamp multiplier of the simulation-shaped stream
    pub max_step: i64,
}

/// Synthetic stream shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    /// `v<k>` ids, a fresh label per edge, timestamps `start + i * step`
    /// (not monotonic, so arrivals interleave)
    #[default]
    Simulation,
    /// Numeric ids without self-loops, a small label alphabet, timestamps
    /// strictly increasing by 100 to 500
    Dataset,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, compact)
    pub format: String,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            alpha: 1.5,
            lambda_base: 172_800.0,
            gamma: 0.01,
            beta: 2.5,
            lambda_scope: LambdaScope::PerEdge,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            input: None,
            generator: GeneratorKind::Simulation,
            edges: 50_000,
            max_vertex: 40_000,
            labels: 1,
            seed: None,
            start_time: 1_217_801_240,
            max_step: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl FromStr for LambdaScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "per-edge" | "per_edge" | "edge" => Ok(LambdaScope::PerEdge),
            "global" => Ok(LambdaScope::Global),
            "per-window" | "per_window" | "window" => Ok(LambdaScope::PerWindow),
            other => Err(Error::config(format!(
                "Invalid lambda scope: {}. Valid options: per-edge, global, per-window",
                other
            ))),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simulation" => Ok(GeneratorKind::Simulation),
            "dataset" => Ok(GeneratorKind::Dataset),
            other => Err(Error::config(format!(
                "Invalid generator: {}. Valid options: simulation, dataset",
                other
            ))),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment variables
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&contents)?)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("DW_ALPHA") {
            self.decay.alpha = parse_value("DW_ALPHA", &v)?;
        }

        if let Some(v) = lookup("DW_LAMBDA_BASE") {
            self.decay.lambda_base = parse_value("DW_LAMBDA_BASE", &v)?;
        }

        if let Some(v) = lookup("DW_GAMMA") {
            self.decay.gamma = parse_value("DW_GAMMA", &v)?;
        }

        if let Some(v) = lookup("DW_BETA") {
            self.decay.beta = parse_value("DW_BETA", &v)?;
        }

        if let Some(v) = lookup("DW_LAMBDA_SCOPE") {
            self.decay.lambda_scope = v.parse()?;
        }

        if let Some(v) = lookup("DW_INPUT") {
            self.stream.input = Some(PathBuf::from(v));
        }

        if let Some(v) = lookup("DW_GENERATOR") {
            self.stream.generator = v.parse()?;
        }

        if let Some(v) = lookup("DW_SEED") {
            self.stream.seed = Some(parse_value("DW_SEED", &v)?);
        }

        if let Some(v) = lookup("DW_LOG_LEVEL") {
            self.logging.level = v;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.decay.validate()?;
        self.stream.validate()?;

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" => {}
            _ => return Err(Error::config("Invalid log format")),
        }

        Ok(())
    }
}

impl DecayConfig {
    /// Validate the policy parameters
    pub fn validate(&self) -> Result<()> {
        let params = [
            ("alpha", self.alpha),
            ("lambda_base", self.lambda_base),
            ("gamma", self.gamma),
            ("beta", self.beta),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(Error::config(format!("{} must be finite, got {}", name, value)));
            }
        }

        if self.alpha <= 0.0 {
            return Err(Error::config("alpha must be positive"));
        }
        if self.lambda_base <= 0.0 {
            return Err(Error::config("lambda_base must be positive"));
        }
        if self.gamma < 0.0 {
            return Err(Error::config("gamma must not be negative"));
        }
        if self.beta < 0.0 {
            return Err(Error::config("beta must not be negative"));
        }

        Ok(())
    }
}

impl StreamConfig {
    /// Validate the synthetic stream settings
    pub fn validate(&self) -> Result<()> {
        if self.edges == 0 {
            return Err(Error::config("Synthetic edge count must be positive"));
        }
        if self.max_vertex == 0 {
            return Err(Error::config("max_vertex must be positive"));
        }
        if self.generator == GeneratorKind::Dataset && self.max_vertex < 2 {
            return Err(Error::config(
                "dataset generator needs max_vertex >= 2 to avoid self-loops",
            ));
        }
        if self.labels == 0 {
            return Err(Error::config("labels must be positive"));
        }
        if self.max_step <= 0 {
            return Err(Error::config("max_step must be positive"));
        }
        self.last_timestamp()?;
        Ok(())
    }

    /// Largest timestamp the synthetic stream can produce; errors when it
    /// does not fit in a timestamp
    pub fn last_timestamp(&self) -> Result<i64> {
        let step = match self.generator {
            GeneratorKind::Simulation => self.max_step,
            GeneratorKind::Dataset => DATASET_MAX_GAP,
        };
        i64::try_from(self.edges)
            .ok()
            .and_then(|n| n.checked_mul(step))
            .and_then(|span| self.start_time.checked_add(span))
            .ok_or_else(|| {
                Error::config(format!(
                    "synthetic timestamps overflow: start_time {} + {} edges * step {}",
                    self.start_time, self.edges, step
                ))
            })
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::config(format!("Invalid {}: {}", key, e)))
}
