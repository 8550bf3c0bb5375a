//! Configuration loading and typed config structures for the Forage simulation.
//!
//! The canonical configuration lives in `forage-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every field has a
//! default, so a partial (or empty) file is valid.

use std::path::Path;

use forage_planner::{ActionSettings, HalvingGoal};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `forage-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, pacing, time step).
    #[serde(default)]
    pub world: WorldConfig,

    /// Search budget.
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Agent walking speed.
    #[serde(default)]
    pub movement: MovementConfig,

    /// Default goal chunking.
    #[serde(default)]
    pub goals: GoalsConfig,

    /// Action derivation parameters.
    #[serde(default)]
    pub actions: ActionsConfig,

    /// Agent population.
    #[serde(default)]
    pub agents: AgentsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Simulation boundary parameters.
    #[serde(default)]
    pub simulation: SimulationBoundsConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) when the file exists.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Simulated seconds per tick.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            tick_interval_ms: default_tick_interval_ms(),
            tick_seconds: default_tick_seconds(),
        }
    }
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    /// Search nodes each agent may expand per tick.
    #[serde(default = "default_iterations_per_tick")]
    pub iterations_per_tick: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            iterations_per_tick: default_iterations_per_tick(),
        }
    }
}

/// Movement configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementConfig {
    /// Grid cells an agent walks per simulated second.
    #[serde(default = "default_cells_per_second")]
    pub cells_per_second: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            cells_per_second: default_cells_per_second(),
        }
    }
}

/// Goal chunking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoalsConfig {
    /// Units requested per goal chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i32,

    /// Smallest chunk worth planning for.
    #[serde(default = "default_min_chunk")]
    pub min_chunk: u32,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            min_chunk: default_min_chunk(),
        }
    }
}

impl GoalsConfig {
    /// The halving goal logic these settings describe.
    pub const fn halving(&self) -> HalvingGoal {
        HalvingGoal {
            chunk: self.chunk_size,
            min_chunk: self.min_chunk,
        }
    }
}

/// Action derivation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionsConfig {
    /// Gather cost per unit of weight moved.
    #[serde(default = "default_gather_cost_per_weight")]
    pub gather_cost_per_weight: f64,

    /// Flat cost of one deposit.
    #[serde(default = "default_deposit_cost")]
    pub deposit_cost: f64,

    /// Weight an agent lifts in one gather.
    #[serde(default = "default_carry_limit")]
    pub carry_limit: u32,

    /// Simulated seconds spent gathering.
    #[serde(default = "default_gather_seconds")]
    pub gather_seconds: f64,

    /// Simulated seconds spent depositing.
    #[serde(default = "default_deposit_seconds")]
    pub deposit_seconds: f64,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            gather_cost_per_weight: default_gather_cost_per_weight(),
            deposit_cost: default_deposit_cost(),
            carry_limit: default_carry_limit(),
            gather_seconds: default_gather_seconds(),
            deposit_seconds: default_deposit_seconds(),
        }
    }
}

impl ActionsConfig {
    /// Convert to the planner's action settings.
    pub const fn settings(&self) -> ActionSettings {
        ActionSettings {
            gather_cost_per_weight: self.gather_cost_per_weight,
            deposit_cost: self.deposit_cost,
            carry_limit: self.carry_limit,
            gather_seconds: self.gather_seconds,
            deposit_seconds: self.deposit_seconds,
        }
    }
}

/// Agent population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentsConfig {
    /// Number of gatherers to spawn.
    #[serde(default = "default_agent_count")]
    pub count: u32,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            count: default_agent_count(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level filter (overridden by `RUST_LOG`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Simulation boundary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationBoundsConfig {
    /// Maximum ticks before stopping (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds before stopping (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Forage".to_owned()
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_tick_seconds() -> f64 {
    0.25
}

const fn default_iterations_per_tick() -> usize {
    64
}

const fn default_cells_per_second() -> f64 {
    4.0
}

const fn default_chunk_size() -> i32 {
    20
}

const fn default_min_chunk() -> u32 {
    2
}

const fn default_gather_cost_per_weight() -> f64 {
    0.5
}

const fn default_deposit_cost() -> f64 {
    1.0
}

const fn default_carry_limit() -> u32 {
    20
}

const fn default_gather_seconds() -> f64 {
    2.0
}

const fn default_deposit_seconds() -> f64 {
    1.0
}

const fn default_agent_count() -> u32 {
    3
}

fn default_log_level() -> String {
    "info".to_owned()
}
