//! The planning domain as a search graph.
//!
//! A [`GoapNode`] wraps one [`WorldState`], the action that produced it
//! (absent for the root), and a shared [`RunInfo`] naming the acting agent,
//! the actions it may take, and the [`GoalState`] being searched for. Node
//! identity is the state's content hash, so two action orders that reach
//! the same world collapse into one node.

use std::sync::Arc;

use forage_search::Node;
use forage_types::AgentId;
use forage_world::WorldState;

use crate::actions::Action;
use crate::error::PlannerError;
use crate::goal_state::GoalState;
use crate::heuristic;

/// Data shared by every node of one search.
#[derive(Debug, Clone)]
pub struct RunInfo {
    /// The agent whose plan is being searched.
    pub agent: AgentId,
    /// Actions the agent may take.
    pub actions: Vec<Action>,
    /// Targets the search must reach.
    pub goal: GoalState,
}

/// One world state in the planning graph.
#[derive(Debug, Clone)]
pub struct GoapNode {
    state: WorldState,
    action: Option<Action>,
    run: Arc<RunInfo>,
}

impl GoapNode {
    /// Create a root node.
    pub fn root(state: WorldState, run: Arc<RunInfo>) -> Self {
        Self {
            state,
            action: None,
            run,
        }
    }

    /// Create the goal node of a run. Its targets are `run.goal`; the
    /// wrapped state is empty and never read.
    pub fn goal(run: Arc<RunInfo>) -> Self {
        Self::root(WorldState::new(), run)
    }

    /// The wrapped world state.
    pub const fn state(&self) -> &WorldState {
        &self.state
    }

    /// The action that produced this node, if any.
    pub const fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// Shared run information.
    pub fn run(&self) -> &RunInfo {
        &self.run
    }
}

impl Node for GoapNode {
    type Error = PlannerError;

    fn heuristic(&self, goal: &Self) -> Result<f64, Self::Error> {
        heuristic::estimate(&self.state, &goal.run.goal, &self.run.agent, &self.run.actions)
    }

    fn id(&self) -> Result<String, Self::Error> {
        Ok(self.state.content_hash()?)
    }

    fn cost(&self, _predecessor: &Self) -> f64 {
        self.action
            .as_ref()
            .map_or(0.0, |a| a.cost(&self.run.agent))
    }

    fn successors(&self) -> Result<Vec<Self>, Self::Error> {
        let mut out = Vec::new();
        for action in &self.run.actions {
            if let Some(state) = action.perform(&self.state, &self.run.agent)? {
                out.push(Self {
                    state,
                    action: Some(action.clone()),
                    run: Arc::clone(&self.run),
                });
            }
        }
        Ok(out)
    }

    /// A node reaches the goal when every amount the goal targets is
    /// matched exactly, zero included.
    fn is_goal(&self, goal: &Self) -> Result<bool, Self::Error> {
        Ok(goal.run.goal.is_met(&self.state))
    }
}
