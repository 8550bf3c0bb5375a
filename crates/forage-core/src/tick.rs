//! Tick cycle: one discrete step of the Forage simulation.
//!
//! Each tick:
//!
//! 1. **Advance** -- move the clock forward one step.
//! 2. **Snapshot** -- copy the world as it stands. Planning in every agent
//!    reads this copy, so agents plan against the same world regardless of
//!    the order they run in.
//! 3. **Behave** -- tick every agent's behavior in name order. Movement and
//!    actions write to the live world.
//! 4. **Summarise** -- tally what happened into a [`TickSummary`].
//!
//! Snapshots share unchanged entries with the live world, so step 2 costs
//! a map copy rather than a deep copy.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use forage_types::AgentId;
use forage_world::{Agent, WorldError, WorldState};
use tracing::{debug, info};

use crate::behavior::{Behavior, BehaviorError, BehaviorEvent, BehaviorState};
use crate::clock::SimClock;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },

    /// An agent's behavior hit a structural fault.
    #[error("behavior error for {agent_id}: {source}")]
    Behavior {
        /// The agent whose behavior failed.
        agent_id: AgentId,
        /// The underlying behavior error.
        source: BehaviorError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A behavior was registered for an agent its own id does not match.
    #[error("behavior for {behavior} registered under agent {agent}")]
    MismatchedBehavior {
        /// The agent body id.
        agent: AgentId,
        /// The id the behavior drives.
        behavior: AgentId,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated seconds elapsed after this tick.
    pub elapsed_seconds: f64,
    /// Wall-clock time the tick finished.
    pub completed_at: DateTime<Utc>,
    /// State of every agent at end of tick.
    pub states: BTreeMap<AgentId, BehaviorState>,
    /// Everything each agent reported this tick.
    pub events: BTreeMap<AgentId, Vec<BehaviorEvent>>,
    /// Plans installed this tick.
    pub plans_installed: u32,
    /// Actions performed this tick.
    pub actions_performed: u32,
    /// Plans dropped because an action no longer applied.
    pub plans_abandoned: u32,
    /// Agents that gave up this tick.
    pub gave_up: Vec<AgentId>,
}

impl TickSummary {
    /// Number of agents in a given state.
    pub fn count_in(&self, state: BehaviorState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// The simulation clock.
    pub clock: SimClock,
    /// The live world.
    pub world: WorldState,
    /// Behavior per agent, keyed by agent id.
    pub behaviors: BTreeMap<AgentId, Behavior>,
}

impl SimulationState {
    /// Create a state with no agents.
    pub const fn new(clock: SimClock, world: WorldState) -> Self {
        Self {
            clock,
            world,
            behaviors: BTreeMap::new(),
        }
    }

    /// Place an agent body in the world and attach its behavior.
    ///
    /// # Errors
    ///
    /// - [`TickError::MismatchedBehavior`] if the behavior drives another agent.
    /// - [`TickError::World`] if the agent id is taken.
    pub fn add_agent(&mut self, agent: Agent, behavior: Behavior) -> Result<(), TickError> {
        if behavior.agent() != &agent.id {
            return Err(TickError::MismatchedBehavior {
                agent: agent.id,
                behavior: behavior.agent().clone(),
            });
        }
        let id = agent.id.clone();
        self.world.insert_agent(agent)?;
        self.behaviors.insert(id, behavior);
        Ok(())
    }

    /// Whether every agent has given up on its goal.
    pub fn all_given_up(&self) -> bool {
        !self.behaviors.is_empty() && self.behaviors.values().all(Behavior::has_given_up)
    }
}

/// Execute one tick.
///
/// # Errors
///
/// Returns [`TickError`] if the clock overflows or a behavior reports a
/// structural fault. Agents ticked before the failure keep their changes.
pub fn run_tick(state: &mut SimulationState) -> Result<TickSummary, TickError> {
    let tick = state.clock.advance()?;
    let dt = state.clock.tick_seconds();
    debug!(tick, dt, "Tick started");

    let snapshot = state.world.clone();

    let mut summary = TickSummary {
        tick,
        elapsed_seconds: state.clock.elapsed_seconds(),
        completed_at: Utc::now(),
        states: BTreeMap::new(),
        events: BTreeMap::new(),
        plans_installed: 0,
        actions_performed: 0,
        plans_abandoned: 0,
        gave_up: Vec::new(),
    };

    for (agent_id, behavior) in &mut state.behaviors {
        let events = behavior
            .tick(&snapshot, &mut state.world, dt)
            .map_err(|source| TickError::Behavior {
                agent_id: agent_id.clone(),
                source,
            })?;
        tally(&mut summary, agent_id, &events);
        summary.states.insert(agent_id.clone(), behavior.state());
        if !events.is_empty() {
            summary.events.insert(agent_id.clone(), events);
        }
    }

    summary.completed_at = Utc::now();
    info!(
        tick,
        idle = summary.count_in(BehaviorState::Idle),
        moving = summary.count_in(BehaviorState::Moving),
        performing = summary.count_in(BehaviorState::Performing),
        plans = summary.plans_installed,
        performed = summary.actions_performed,
        "Tick complete"
    );
    Ok(summary)
}

fn tally(summary: &mut TickSummary, agent_id: &AgentId, events: &[BehaviorEvent]) {
    for event in events {
        match event {
            BehaviorEvent::PlanInstalled { .. } => {
                summary.plans_installed = summary.plans_installed.saturating_add(1);
            }
            BehaviorEvent::Performed { .. } => {
                summary.actions_performed = summary.actions_performed.saturating_add(1);
            }
            BehaviorEvent::PlanAbandoned { .. } => {
                summary.plans_abandoned = summary.plans_abandoned.saturating_add(1);
            }
            BehaviorEvent::GaveUp => summary.gave_up.push(agent_id.clone()),
            BehaviorEvent::GoalSatisfied
            | BehaviorEvent::Retry { .. }
            | BehaviorEvent::Transition { .. } => {}
        }
    }
}
