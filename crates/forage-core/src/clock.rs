//! Simulation clock.
//!
//! The clock counts ticks and the simulated seconds they represent. Every
//! tick advances simulated time by the same `tick_seconds`, which is the
//! `dt` handed to each agent's behavior. Tick counting uses checked
//! arithmetic; simulated seconds are derived from the tick count rather
//! than accumulated, so they never drift.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid time configuration (e.g. zero seconds per tick).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tick counter plus simulated time step.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    /// Current tick number (0 before the first tick runs).
    tick: u64,

    /// Simulated seconds per tick.
    tick_seconds: f64,
}

impl SimClock {
    /// Create a clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] unless `tick_seconds` is a
    /// positive finite number.
    pub fn new(tick_seconds: f64) -> Result<Self, ClockError> {
        Self::from_parts(0, tick_seconds)
    }

    /// Create a clock at an arbitrary tick (state restoration, tests).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] unless `tick_seconds` is a
    /// positive finite number.
    pub fn from_parts(tick: u64, tick_seconds: f64) -> Result<Self, ClockError> {
        if !tick_seconds.is_finite() || tick_seconds <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: format!("tick_seconds must be positive, got {tick_seconds}"),
            });
        }
        Ok(Self { tick, tick_seconds })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds per tick.
    pub const fn tick_seconds(&self) -> f64 {
        self.tick_seconds
    }

    /// Simulated seconds elapsed after the current tick.
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_seconds(&self) -> f64 {
        // Precision loss only matters past 2^53 ticks.
        self.tick as f64 * self.tick_seconds
    }
}
