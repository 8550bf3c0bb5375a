//! Plans: ordered, consumable action sequences.

use std::sync::Arc;

use forage_search::SearchEngine;
use forage_types::AgentId;
use forage_world::WorldState;

use crate::actions::Action;
use crate::error::PlannerError;
use crate::goal_state::GoalState;
use crate::node::{GoapNode, RunInfo};

/// A search over the planning graph.
pub type PlanSearch = SearchEngine<GoapNode>;

/// Start a resumable search from `state` toward `goal` for `agent`.
pub fn start_search(
    state: WorldState,
    goal: GoalState,
    agent: AgentId,
    actions: Vec<Action>,
) -> Result<PlanSearch, PlannerError> {
    let run = Arc::new(RunInfo {
        agent,
        actions,
        goal,
    });
    let start = GoapNode::root(state, Arc::clone(&run));
    let goal = GoapNode::goal(run);
    SearchEngine::new(start, goal)
}

/// An ordered sequence of actions with a cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    actions: Vec<Action>,
    cursor: usize,
    total_cost: f64,
}

impl Plan {
    /// Create a plan from explicit actions.
    pub const fn new(actions: Vec<Action>, total_cost: f64) -> Self {
        Self {
            actions,
            cursor: 0,
            total_cost,
        }
    }

    /// Build a plan from a start-to-goal node chain.
    ///
    /// The root carries no action and is skipped.
    pub fn from_path(path: &[&GoapNode], total_cost: f64) -> Self {
        let actions = path
            .iter()
            .filter_map(|node| node.action().cloned())
            .collect();
        Self::new(actions, total_cost)
    }

    /// Build a plan from the best path a search has found so far.
    pub fn from_search(search: &PlanSearch) -> Option<Self> {
        let path = search.current_best_path()?;
        let cost = search.best_cost()?;
        Some(Self::from_path(&path, cost))
    }

    /// The action at the cursor, without advancing.
    pub fn peek(&self) -> Option<&Action> {
        self.actions.get(self.cursor)
    }

    /// The action at the cursor; the cursor then advances.
    pub fn pop(&mut self) -> Option<Action> {
        let action = self.actions.get(self.cursor).cloned()?;
        self.cursor = self.cursor.saturating_add(1);
        Some(action)
    }

    /// Whether every action has been consumed.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// Total number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the plan has no actions at all.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions not yet consumed.
    pub fn remaining(&self) -> usize {
        self.actions.len().saturating_sub(self.cursor)
    }

    /// Planned cost of the whole sequence.
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// All actions, consumed or not.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}
