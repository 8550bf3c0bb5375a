//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: forage_core::config::ConfigError,
    },

    /// Simulation clock initialization failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: forage_core::clock::ClockError,
    },

    /// Starting world construction failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: forage_world::WorldError,
    },

    /// Action derivation failed.
    #[error("planner error: {source}")]
    Planner {
        /// The underlying planner error.
        #[from]
        source: forage_planner::PlannerError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: forage_core::runner::RunnerError,
    },

    /// Agent spawning failed.
    #[error("spawner error: {message}")]
    Spawner {
        /// Description of the spawner failure.
        message: String,
    },
}
