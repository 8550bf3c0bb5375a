//! Simulation binary for Forage.
//!
//! This is the main entry point that wires together the starting world,
//! the action registry, the gatherer spawner, and operator controls. It
//! loads configuration, initializes all subsystems, and runs the
//! simulation loop until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `forage-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Create the simulation clock
//! 4. Create the starting world and derive its actions
//! 5. Spawn gatherers at the spawn point
//! 6. Create operator state and hook Ctrl-C to a clean stop
//! 7. Run the simulation loop
//! 8. Log the result

mod error;
mod log_callback;
mod spawner;

use std::path::Path;
use std::sync::Arc;

use forage_core::clock::SimClock;
use forage_core::config::SimulationConfig;
use forage_core::operator::OperatorState;
use forage_core::runner;
use forage_core::tick::SimulationState;
use forage_planner::ActionRegistry;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

/// Ticks between stockpile reports.
const REPORT_EVERY_TICKS: u64 = 40;

/// Application entry point for the simulation.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = SimulationConfig::load_or_default(Path::new("forage-config.yaml"))
        .map_err(EngineError::from)?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        world_name = config.world.name,
        tick_interval_ms = config.world.tick_interval_ms,
        tick_seconds = config.world.tick_seconds,
        iterations_per_tick = config.planner.iterations_per_tick,
        "forage-engine starting"
    );

    // 3. Create simulation clock.
    let clock = SimClock::new(config.world.tick_seconds).map_err(EngineError::from)?;

    // 4. Create starting world and derive actions.
    let world = forage_world::create_starting_world().map_err(EngineError::from)?;
    let registry =
        ActionRegistry::from_world(config.actions.settings(), &world.resources, &world.state)
            .map_err(EngineError::from)?;
    info!(
        locations = world.state.location_count(),
        resources = world.resources.len(),
        actions = registry.len(),
        "Starting world created"
    );

    // 5. Spawn gatherers.
    let mut sim_state = SimulationState::new(clock, world.state.clone());
    let spawned = spawner::spawn_gatherers(&config, &world, &registry, &mut sim_state)?;
    info!(agents_spawned = spawned.len(), "Gatherers spawned");

    // 6. Create operator state.
    let operator = Arc::new(OperatorState::new(
        config.world.tick_interval_ms,
        &config.simulation,
    ));
    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after the current tick");
                    operator.request_stop();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });
    }

    // 7. Run the simulation.
    let mut callback = LogCallback::new(world.stockpile.clone(), REPORT_EVERY_TICKS);
    let result = runner::run_simulation(&mut sim_state, &operator, &mut callback)
        .await
        .map_err(EngineError::from)?;

    // 8. Log results.
    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "forage-engine shutdown complete"
    );

    Ok(())
}
