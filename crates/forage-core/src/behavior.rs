//! Per-agent behavior state machine.
//!
//! Each agent cycles through three states:
//!
//! - **Idle** -- no plan. Asks the goal for a target chunk, runs a bounded
//!   slice of the planning search each tick, and installs the plan once
//!   the search settles. A search that finds no path bumps the retry
//!   counter so the next attempt asks for a smaller chunk; when the goal
//!   gives up the agent stays idle until its goal is replaced.
//! - **Moving** -- walks toward the location the next action requires.
//! - **Performing** -- waits out the action's duration, then performs it
//!   against the live world.
//!
//! Planning reads the snapshot taken at the start of the tick; moving and
//! performing write to the live world. Nothing here blocks: a search that
//! needs many expansions simply continues on later ticks.

use std::collections::VecDeque;
use std::fmt;

use forage_planner::{Action, Goal, Plan, PlanSearch, PlannerError, start_search};
use forage_search::{SearchError, SearchStatus};
use forage_types::{AgentId, GridPos};
use forage_world::{WorldError, WorldState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Errors that can occur while ticking a behavior.
///
/// These are structural faults. Infeasibility (no path, an action that no
/// longer applies) is handled inside the state machine.
#[derive(Debug, thiserror::Error)]
pub enum BehaviorError {
    /// Planning or performing hit a structural fault.
    #[error("planner error: {source}")]
    Planner {
        /// The underlying planner error.
        #[from]
        source: PlannerError,
    },

    /// A world lookup or movement failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Which state the machine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    /// Planning (or given up).
    Idle,
    /// Walking to the next action's location.
    Moving,
    /// Waiting out an action's duration.
    Performing,
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::Performing => "performing",
        };
        f.write_str(name)
    }
}

/// Something notable that happened during one behavior tick.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorEvent {
    /// The search settled and a plan was installed.
    PlanInstalled {
        /// Number of actions.
        actions: usize,
        /// Planned cost.
        cost: f64,
    },
    /// The goal was already met; nothing to do this round.
    GoalSatisfied,
    /// The search found no path; the next attempt asks for less.
    Retry {
        /// Retries so far.
        retries: u32,
    },
    /// The goal logic gave up.
    GaveUp,
    /// An action was performed.
    Performed {
        /// Action summary.
        action: String,
    },
    /// An action no longer applied, or its location was unreachable; the
    /// plan was dropped.
    PlanAbandoned {
        /// Action summary.
        action: String,
    },
    /// The state machine changed state.
    Transition {
        /// Previous state.
        from: BehaviorState,
        /// New state.
        to: BehaviorState,
    },
}

/// Tunables for every behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSettings {
    /// Search expansions per tick.
    pub iterations_per_tick: usize,
    /// Grid cells walked per simulated second.
    pub cells_per_second: f64,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            iterations_per_tick: 64,
            cells_per_second: 4.0,
        }
    }
}

/// The planning half of an agent.
#[derive(Debug)]
pub struct Behavior {
    agent: AgentId,
    goal: Goal,
    actions: Vec<Action>,
    settings: BehaviorSettings,
    state: BehaviorState,
    plan: Option<Plan>,
    search: Option<PlanSearch>,
    retries: u32,
    gave_up: bool,
    path: VecDeque<GridPos>,
    stride: f64,
    remaining: f64,
}

impl Behavior {
    /// Create an idle behavior for `agent` pursuing `goal`.
    pub const fn new(
        agent: AgentId,
        goal: Goal,
        actions: Vec<Action>,
        settings: BehaviorSettings,
    ) -> Self {
        Self {
            agent,
            goal,
            actions,
            settings,
            state: BehaviorState::Idle,
            plan: None,
            search: None,
            retries: 0,
            gave_up: false,
            path: VecDeque::new(),
            stride: 0.0,
            remaining: 0.0,
        }
    }

    /// The agent this behavior drives.
    pub const fn agent(&self) -> &AgentId {
        &self.agent
    }

    /// Current state.
    pub const fn state(&self) -> BehaviorState {
        self.state
    }

    /// Current goal.
    pub const fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Installed plan, if any.
    pub const fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Failed planning attempts since the last success.
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Whether the goal logic has given up.
    pub const fn has_given_up(&self) -> bool {
        self.gave_up
    }

    /// Whether a search is in progress.
    pub const fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    /// Replace the goal and start over from idle.
    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = goal;
        self.reset();
        self.retries = 0;
        self.gave_up = false;
    }

    /// Advance the machine by `dt` simulated seconds.
    ///
    /// `snapshot` is the world as it stood at the start of the tick and is
    /// what planning reads. `world` is the live world that movement and
    /// actions change.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviorError`] for structural faults only.
    pub fn tick(
        &mut self,
        snapshot: &WorldState,
        world: &mut WorldState,
        dt: f64,
    ) -> Result<Vec<BehaviorEvent>, BehaviorError> {
        let mut events = Vec::new();
        let before = self.state;
        match self.state {
            BehaviorState::Idle => self.tick_idle(snapshot, &mut events)?,
            BehaviorState::Moving => self.tick_moving(world, dt, &mut events)?,
            BehaviorState::Performing => self.tick_performing(world, dt, &mut events)?,
        }
        if self.state != before {
            debug!(agent = %self.agent, from = %before, to = %self.state, "State transition");
            events.push(BehaviorEvent::Transition {
                from: before,
                to: self.state,
            });
        }
        Ok(events)
    }

    // ------------------------------------------------------------------
    // Idle
    // ------------------------------------------------------------------

    fn tick_idle(
        &mut self,
        snapshot: &WorldState,
        events: &mut Vec<BehaviorEvent>,
    ) -> Result<(), BehaviorError> {
        if self.gave_up {
            return Ok(());
        }

        if self.search.is_none() {
            let Some(target) = self.goal.get_goal_chunk(snapshot, self.retries)? else {
                self.give_up(events);
                return Ok(());
            };
            debug!(
                agent = %self.agent,
                goal = %self.goal,
                retries = self.retries,
                "Starting plan search"
            );
            self.search = Some(start_search(
                snapshot.clone(),
                target,
                self.agent.clone(),
                self.actions.clone(),
            )?);
        }
        let Some(search) = self.search.as_mut() else {
            return Ok(());
        };

        match search.run_iterations(self.settings.iterations_per_tick) {
            Ok(SearchStatus::Pending) => {}
            Ok(SearchStatus::Found) => {
                let plan = Plan::from_search(search).unwrap_or_default();
                self.search = None;
                self.retries = 0;
                if plan.is_empty() {
                    events.push(BehaviorEvent::GoalSatisfied);
                } else {
                    info!(
                        agent = %self.agent,
                        actions = plan.len(),
                        cost = plan.total_cost(),
                        "Plan installed"
                    );
                    events.push(BehaviorEvent::PlanInstalled {
                        actions: plan.len(),
                        cost: plan.total_cost(),
                    });
                    self.plan = Some(plan);
                    self.state = BehaviorState::Moving;
                }
            }
            Err(SearchError::NoPath) => {
                self.search = None;
                self.retries = self.retries.saturating_add(1);
                debug!(agent = %self.agent, retries = self.retries, "No path, shrinking goal");
                events.push(BehaviorEvent::Retry {
                    retries: self.retries,
                });
                if self.goal.get_delta(self.retries).is_none() {
                    self.give_up(events);
                }
            }
            Err(SearchError::Node { source }) => {
                self.search = None;
                return Err(source.into());
            }
        }
        Ok(())
    }

    fn give_up(&mut self, events: &mut Vec<BehaviorEvent>) {
        warn!(
            agent = %self.agent,
            goal = %self.goal,
            retries = self.retries,
            "Giving up on goal"
        );
        self.gave_up = true;
        events.push(BehaviorEvent::GaveUp);
    }

    // ------------------------------------------------------------------
    // Moving
    // ------------------------------------------------------------------

    fn tick_moving(
        &mut self,
        world: &mut WorldState,
        dt: f64,
        events: &mut Vec<BehaviorEvent>,
    ) -> Result<(), BehaviorError> {
        let Some(action) = self.next_action().cloned() else {
            self.reset();
            return Ok(());
        };
        let Some(location) = action.location() else {
            self.start_performing(&action);
            return Ok(());
        };

        let target = world.require_location(location)?.position;
        let here = world.require_agent(&self.agent)?.position;
        if here == target {
            self.start_performing(&action);
            return Ok(());
        }

        if self.path.back() != Some(&target) {
            let Some(path) = route(world, here, target) else {
                self.abandon(&action, events);
                return Ok(());
            };
            self.path = path.into();
            self.stride = 0.0;
        }

        self.stride += self.settings.cells_per_second * dt;
        while self.stride >= 1.0 {
            let Some(next) = self.path.pop_front() else {
                break;
            };
            world.set_agent_position(&self.agent, next)?;
            self.stride -= 1.0;
        }

        if self.path.is_empty() {
            self.start_performing(&action);
        }
        Ok(())
    }

    fn start_performing(&mut self, action: &Action) {
        self.path.clear();
        self.stride = 0.0;
        self.remaining = action.duration();
        self.state = BehaviorState::Performing;
    }

    // ------------------------------------------------------------------
    // Performing
    // ------------------------------------------------------------------

    fn tick_performing(
        &mut self,
        world: &mut WorldState,
        dt: f64,
        events: &mut Vec<BehaviorEvent>,
    ) -> Result<(), BehaviorError> {
        let Some(action) = self.next_action().cloned() else {
            self.reset();
            return Ok(());
        };

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return Ok(());
        }

        let Some(next) = action.perform(world, &self.agent)? else {
            self.abandon(&action, events);
            return Ok(());
        };
        *world = next;
        debug!(agent = %self.agent, action = %action, "Action performed");
        events.push(BehaviorEvent::Performed {
            action: action.description(),
        });

        let complete = self.plan.as_mut().is_none_or(|plan| {
            let _ = plan.pop();
            plan.is_complete()
        });
        if complete {
            self.reset();
        } else {
            self.state = BehaviorState::Moving;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn next_action(&self) -> Option<&Action> {
        self.plan.as_ref().and_then(Plan::peek)
    }

    fn abandon(&mut self, action: &Action, events: &mut Vec<BehaviorEvent>) {
        info!(agent = %self.agent, action = %action, "Plan abandoned");
        events.push(BehaviorEvent::PlanAbandoned {
            action: action.description(),
        });
        self.reset();
    }

    /// Drop plan and search, return to idle.
    fn reset(&mut self) {
        self.plan = None;
        self.search = None;
        self.path.clear();
        self.stride = 0.0;
        self.remaining = 0.0;
        self.state = BehaviorState::Idle;
    }
}

/// Cells from `from` (exclusive) to `to` (inclusive).
///
/// Uses the world's grid when it has one; otherwise walks straight
/// Manhattan steps.
fn route(world: &WorldState, from: GridPos, to: GridPos) -> Option<Vec<GridPos>> {
    if let Some(grid) = world.grid() {
        return grid.find_path(from, to);
    }
    let mut path = Vec::new();
    let mut cursor = from;
    while cursor != to {
        cursor = cursor.step_toward(to);
        path.push(cursor);
    }
    Some(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use forage_planner::{Deposit, Gather, HalvingGoal};
    use forage_types::{EntityKind, LocationId, ResourceId};
    use forage_world::{Agent, Location};

    use super::*;

    fn wood() -> ResourceId {
        ResourceId::new("wood")
    }

    fn world(forest: u32) -> WorldState {
        let mut s = WorldState::new();
        s.insert_location(
            Location::new("forest", GridPos::new(0, 0))
                .with_stock(&wood(), forest)
                .unwrap(),
        )
        .unwrap();
        s.insert_location(Location::new("pile", GridPos::new(3, 0)))
            .unwrap();
        s.insert_agent(Agent::new("ada", GridPos::new(0, 0))).unwrap();
        s
    }

    fn actions() -> Vec<Action> {
        vec![
            Action::Gather(Gather {
                resource: wood(),
                amount: 10,
                location: LocationId::new("forest"),
                cost: 10.0,
                duration: 1.0,
                required_tool: None,
            }),
            Action::Deposit(Deposit {
                resource: wood(),
                amount: 20,
                location: LocationId::new("pile"),
                cost: 1.0,
                duration: 1.0,
            }),
        ]
    }

    fn behavior(chunk: i32, min_chunk: u32, iterations: usize) -> Behavior {
        Behavior::new(
            AgentId::new("ada"),
            Goal::new(
                "stock wood",
                LocationId::new("pile"),
                wood(),
                Arc::new(HalvingGoal { chunk, min_chunk }),
            ),
            actions(),
            BehaviorSettings {
                iterations_per_tick: iterations,
                cells_per_second: 1.0,
            },
        )
    }

    /// Tick until `done` holds or the limit runs out; returns all events.
    fn run(
        b: &mut Behavior,
        live: &mut WorldState,
        limit: usize,
        done: impl Fn(&Behavior, &WorldState) -> bool,
    ) -> Vec<BehaviorEvent> {
        let mut all = Vec::new();
        for _ in 0..limit {
            let snapshot = live.clone();
            all.extend(b.tick(&snapshot, live, 1.0).unwrap());
            if done(b, live) {
                break;
            }
        }
        all
    }

    #[test]
    fn starts_idle() {
        let b = behavior(20, 2, 64);
        assert_eq!(b.state(), BehaviorState::Idle);
        assert!(b.plan().is_none());
    }

    #[test]
    fn plans_then_moves() {
        let mut b = behavior(20, 2, 64);
        let mut live = world(100);
        let snapshot = live.clone();
        let events = b.tick(&snapshot, &mut live, 1.0).unwrap();
        assert!(events.contains(&BehaviorEvent::PlanInstalled {
            actions: 3,
            cost: 21.0
        }));
        assert_eq!(b.state(), BehaviorState::Moving);
    }

    #[test]
    fn small_budget_spreads_search_over_ticks() {
        let mut b = behavior(20, 2, 1);
        let mut live = world(100);
        let snapshot = live.clone();
        let events = b.tick(&snapshot, &mut live, 1.0).unwrap();
        assert!(events.is_empty());
        assert!(b.is_searching());
        assert_eq!(b.state(), BehaviorState::Idle);

        let events = run(&mut b, &mut live, 50, |b, _| b.state() != BehaviorState::Idle);
        assert!(events
            .iter()
            .any(|e| matches!(e, BehaviorEvent::PlanInstalled { .. })));
    }

    #[test]
    fn executes_plan_into_world() {
        let mut b = behavior(20, 2, 64);
        let mut live = world(100);
        let events = run(&mut b, &mut live, 40, |_, w| {
            w.amount_at(EntityKind::Location, "pile", &wood()) >= 20
        });
        assert_eq!(live.amount_at(EntityKind::Location, "pile", &wood()), 20);
        assert_eq!(live.amount_at(EntityKind::Location, "forest", &wood()), 80);
        let performed = events
            .iter()
            .filter(|e| matches!(e, BehaviorEvent::Performed { .. }))
            .count();
        assert_eq!(performed, 3);
        assert_eq!(
            live.agent(&AgentId::new("ada")).map(|a| a.position),
            Some(GridPos::new(3, 0))
        );
    }

    #[test]
    fn infeasible_goal_shrinks_then_succeeds() {
        // Only 10 wood exist: 20 fails, 10 succeeds after one retry.
        let mut b = behavior(20, 2, 64);
        let mut live = world(10);
        let events = run(&mut b, &mut live, 10, |b, _| b.plan().is_some());
        assert!(events.contains(&BehaviorEvent::Retry { retries: 1 }));
        assert!(b.plan().is_some());
        assert_eq!(b.retries(), 0);
    }

    #[test]
    fn gives_up_when_chunk_too_small() {
        let mut b = behavior(20, 8, 64);
        let mut live = world(0);
        let events = run(&mut b, &mut live, 10, |b, _| b.has_given_up());
        assert!(b.has_given_up());
        assert!(events.contains(&BehaviorEvent::GaveUp));
        assert_eq!(b.state(), BehaviorState::Idle);

        // Stays idle without planning once given up.
        let snapshot = live.clone();
        assert!(b.tick(&snapshot, &mut live, 1.0).unwrap().is_empty());
        assert!(!b.is_searching());
    }

    #[test]
    fn negative_chunk_empties_the_location() {
        let mut b = Behavior::new(
            AgentId::new("ada"),
            Goal::new(
                "clear forest",
                LocationId::new("forest"),
                wood(),
                Arc::new(HalvingGoal {
                    chunk: -20,
                    min_chunk: 1,
                }),
            ),
            vec![Action::Gather(Gather {
                resource: wood(),
                amount: 7,
                location: LocationId::new("forest"),
                cost: 1.0,
                duration: 1.0,
                required_tool: None,
            })],
            BehaviorSettings {
                iterations_per_tick: 64,
                cells_per_second: 1.0,
            },
        );
        let mut live = world(7);
        let events = run(&mut b, &mut live, 10, |_, w| {
            w.amount_at(EntityKind::Location, "forest", &wood()) == 0
        });
        assert!(!events.contains(&BehaviorEvent::GaveUp));
        assert!(!b.has_given_up());
        assert_eq!(live.amount_at(EntityKind::Location, "forest", &wood()), 0);
        assert_eq!(live.amount_at(EntityKind::Agent, "ada", &wood()), 7);
    }

    #[test]
    fn action_no_longer_applicable_reverts_to_idle() {
        let mut b = behavior(10, 2, 64);
        let mut live = world(100);
        let snapshot = live.clone();
        let _ = b.tick(&snapshot, &mut live, 1.0).unwrap();
        assert_eq!(b.state(), BehaviorState::Moving);

        // Someone empties the forest before the gather lands.
        live.adjust(EntityKind::Location, "forest", &wood(), -100)
            .unwrap();
        let events = run(&mut b, &mut live, 5, |b, _| b.state() == BehaviorState::Idle);
        assert!(events
            .iter()
            .any(|e| matches!(e, BehaviorEvent::PlanAbandoned { .. })));
        assert!(b.plan().is_none());
    }

    #[test]
    fn set_goal_clears_give_up() {
        let mut b = behavior(20, 30, 64);
        let mut live = world(0);
        let _ = run(&mut b, &mut live, 5, |b, _| b.has_given_up());
        assert!(b.has_given_up());
        b.set_goal(Goal::new(
            "again",
            LocationId::new("pile"),
            wood(),
            Arc::new(HalvingGoal {
                chunk: 5,
                min_chunk: 1,
            }),
        ));
        assert!(!b.has_given_up());
        assert_eq!(b.retries(), 0);
    }

    #[test]
    fn straight_route_without_grid() {
        let live = world(0);
        let path = route(&live, GridPos::new(0, 0), GridPos::new(2, 1)).unwrap();
        assert_eq!(
            path,
            vec![GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(2, 1)]
        );
    }
}
