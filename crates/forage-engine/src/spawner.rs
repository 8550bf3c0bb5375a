//! Agent spawner for seeding the simulation with gatherers.
//!
//! At simulation start, the spawner creates `agents.count` gatherers at the
//! world's spawn point. Each one hauls a single resource to the stockpile,
//! with resources assigned round-robin so every resource gets a worker
//! before any gets two.

use std::sync::Arc;

use forage_core::behavior::{Behavior, BehaviorSettings};
use forage_core::config::SimulationConfig;
use forage_core::tick::SimulationState;
use forage_planner::{ActionRegistry, Goal};
use forage_types::{AgentId, ResourceId};
use forage_world::{Agent, StartingWorld};
use tracing::info;

use crate::error::EngineError;

/// Built-in pool of agent names, used in order. Past the end of the pool
/// names repeat with a numeric suffix.
const NAME_POOL: &[&str] = &[
    "Alder", "Birch", "Cedar", "Dusk", "Ember", "Fern", "Grove", "Haze", "Iris", "Juniper",
    "Kestrel", "Lark", "Moss", "Nettle", "Oak", "Pine",
];

/// The behavior tunables described by `config`.
pub const fn behavior_settings(config: &SimulationConfig) -> BehaviorSettings {
    BehaviorSettings {
        iterations_per_tick: config.planner.iterations_per_tick,
        cells_per_second: config.movement.cells_per_second,
    }
}

/// Spawn the configured gatherers into `state`.
///
/// Returns the spawned agent ids in spawn order.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if the world has no resources to haul
/// or an agent cannot be placed.
pub fn spawn_gatherers(
    config: &SimulationConfig,
    world: &StartingWorld,
    registry: &ActionRegistry,
    state: &mut SimulationState,
) -> Result<Vec<AgentId>, EngineError> {
    let resources: Vec<&ResourceId> = world.resources.iter().map(|r| &r.id).collect();
    if resources.is_empty() && config.agents.count > 0 {
        return Err(EngineError::Spawner {
            message: String::from("starting world has no resources to gather"),
        });
    }

    let logic = Arc::new(config.goals.halving());
    let settings = behavior_settings(config);
    let mut spawned = Vec::new();

    for (index, resource) in (0..config.agents.count).zip(resources.iter().cycle()) {
        let id = AgentId::new(agent_name(index));
        let goal = Goal::new(
            format!("stock {resource}"),
            world.stockpile.clone(),
            (*resource).clone(),
            logic.clone(),
        );
        let behavior = Behavior::new(
            id.clone(),
            goal,
            registry.actions().to_vec(),
            settings.clone(),
        );
        state
            .add_agent(Agent::new(id.clone(), world.spawn), behavior)
            .map_err(|e| EngineError::Spawner {
                message: format!("failed to place {id}: {e}"),
            })?;
        info!(agent = %id, resource = %resource, "Gatherer spawned");
        spawned.push(id);
    }

    Ok(spawned)
}

fn agent_name(index: u32) -> String {
    let len = u32::try_from(NAME_POOL.len()).unwrap_or(u32::MAX);
    let base = index
        .checked_rem(len)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| NAME_POOL.get(i))
        .copied()
        .unwrap_or("Agent");
    match index.checked_div(len) {
        Some(0) | None => base.to_owned(),
        Some(round) => format!("{base}-{}", round.saturating_add(1)),
    }
}
