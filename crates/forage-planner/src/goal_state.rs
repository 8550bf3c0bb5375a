//! Goal snapshots: the exact amounts a plan must leave behind.
//!
//! A [`GoalState`] is a list of (location, resource, amount) targets, kept
//! sorted and unique by (location, resource). Unlike an inventory it can
//! name an amount of zero, so "empty this location" is a target like any
//! other. Entities and resources the goal does not name are unconstrained.

use forage_types::{EntityKind, LocationId, ResourceId};
use forage_world::WorldState;
use serde::{Deserialize, Serialize};

/// One required amount of one resource at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalTarget {
    /// Where the amount is required.
    pub location: LocationId,
    /// Which resource.
    pub resource: ResourceId,
    /// Exact amount required, possibly zero.
    pub amount: u32,
}

/// The set of targets a search must reach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalState {
    targets: Vec<GoalTarget>,
}

impl GoalState {
    /// An empty goal, met by every state.
    pub const fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with_target(mut self, location: LocationId, resource: ResourceId, amount: u32) -> Self {
        self.set(location, resource, amount);
        self
    }

    /// Require exactly `amount` of `resource` at `location`, replacing any
    /// earlier target for the same pair.
    pub fn set(&mut self, location: LocationId, resource: ResourceId, amount: u32) {
        let found = self
            .targets
            .binary_search_by(|t| (&t.location, &t.resource).cmp(&(&location, &resource)));
        match found {
            Ok(idx) => {
                if let Some(target) = self.targets.get_mut(idx) {
                    target.amount = amount;
                }
            }
            Err(idx) => self.targets.insert(
                idx,
                GoalTarget {
                    location,
                    resource,
                    amount,
                },
            ),
        }
    }

    /// Every location inventory entry of `state` as a target.
    pub fn from_world(state: &WorldState) -> Self {
        let mut goal = Self::new();
        for location in state.locations() {
            for entry in location.inventory.iter() {
                goal.set(location.id.clone(), entry.resource.clone(), entry.amount);
            }
        }
        goal
    }

    /// Targets in (location, resource) order.
    pub fn targets(&self) -> &[GoalTarget] {
        &self.targets
    }

    /// The amount required for a pair, if the goal names it.
    pub fn amount(&self, location: &LocationId, resource: &ResourceId) -> Option<u32> {
        self.targets
            .binary_search_by(|t| (&t.location, &t.resource).cmp(&(location, resource)))
            .ok()
            .and_then(|idx| self.targets.get(idx))
            .map(|t| t.amount)
    }

    /// Whether `state` holds exactly every targeted amount.
    pub fn is_met(&self, state: &WorldState) -> bool {
        self.targets.iter().all(|t| {
            state.amount_at(EntityKind::Location, t.location.as_str(), &t.resource) == t.amount
        })
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the goal names no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
