//! Configuration system for planwright.
//!
//! Load solver configuration from TOML or YAML files to control termination
//! and the local search acceptor without code changes.
//!
//! # Examples
//!
//! ```
//! use planwright_config::{AcceptorConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!     unimproved_step_count_limit = 500
//!
//!     [local_search]
//!     accepted_count_limit = 4
//!     [local_search.acceptor]
//!     type = "late_acceptance"
//!     late_acceptance_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert!(matches!(
//!     config.local_search.unwrap().acceptor,
//!     Some(AcceptorConfig::LateAcceptance(_))
//! ));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use planwright_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! assert!(config.termination.is_none());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Local search configuration.
    #[serde(default)]
    pub local_search: Option<LocalSearchConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, picking the format by extension.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Replaces the termination configuration.
    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the local search configuration.
    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = Some(local_search);
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(local_search) = &self.local_search {
            local_search.validate()?;
        }
        Ok(())
    }
}

/// Termination configuration.
///
/// Every configured limit is combined with OR semantics: the first one
/// reached stops the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,

    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Target best score to achieve (as string, e.g., "0hard/0soft").
    pub best_score_limit: Option<String>,

    /// Stop as soon as the best score is feasible.
    #[serde(default)]
    pub best_score_feasible: bool,

    /// Maximum number of steps.
    pub step_count_limit: Option<u64>,

    /// Maximum unimproved steps before terminating.
    pub unimproved_step_count_limit: Option<u64>,

    /// Maximum seconds without improvement.
    pub unimproved_seconds_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.millis_spent_limit.unwrap_or(0)
            + self.seconds_spent_limit.unwrap_or(0) * 1_000
            + self.minutes_spent_limit.unwrap_or(0) * 60_000;
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }

    /// Returns the unimproved time limit as a Duration, if any.
    pub fn unimproved_time_limit(&self) -> Option<Duration> {
        self.unimproved_seconds_spent_limit.map(Duration::from_secs)
    }

    /// Returns true if no limit is configured.
    pub fn is_empty(&self) -> bool {
        self.time_limit().is_none()
            && self.best_score_limit.is_none()
            && !self.best_score_feasible
            && self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
            && self.unimproved_seconds_spent_limit.is_none()
    }
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Acceptor configuration. Defaults to hill climbing.
    pub acceptor: Option<AcceptorConfig>,

    /// Number of accepted moves gathered before picking the best of them.
    pub accepted_count_limit: Option<usize>,

    /// Number of candidate moves sampled per step.
    pub move_sample_size: Option<usize>,
}

impl LocalSearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.accepted_count_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "accepted_count_limit must be at least 1".to_string(),
            ));
        }
        if self.move_sample_size == Some(0) {
            return Err(ConfigError::Invalid(
                "move_sample_size must be at least 1".to_string(),
            ));
        }
        match &self.acceptor {
            Some(AcceptorConfig::LateAcceptance(c)) if c.late_acceptance_size == Some(0) => Err(
                ConfigError::Invalid("late_acceptance_size must be at least 1".to_string()),
            ),
            Some(AcceptorConfig::SimulatedAnnealing(c)) => {
                if c.starting_temperature.is_some_and(|t| t <= 0.0) {
                    return Err(ConfigError::Invalid(
                        "starting_temperature must be positive".to_string(),
                    ));
                }
                if c.decay_rate.is_some_and(|d| !(0.0..=1.0).contains(&d)) {
                    return Err(ConfigError::Invalid(
                        "decay_rate must be within 0.0..=1.0".to_string(),
                    ));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Acceptor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Hill climbing (only accept improving moves).
    HillClimbing,

    /// Simulated annealing acceptor.
    SimulatedAnnealing(SimulatedAnnealingConfig),

    /// Late acceptance acceptor.
    LateAcceptance(LateAcceptanceConfig),
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// Starting temperature.
    pub starting_temperature: Option<f64>,

    /// Multiplicative temperature decay per step.
    pub decay_rate: Option<f64>,
}

/// Late acceptance configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Size of late acceptance list.
    pub late_acceptance_size: Option<usize>,
}
