//! The action library.
//!
//! An [`Action`] is a stateless capability the planner can chain. The set
//! of kinds is small and fixed, so actions are a tagged enum dispatched
//! statically rather than trait objects.
//!
//! Every action honours one contract: [`Action::changes`] must describe
//! exactly what [`Action::perform`] does at full amount, because the
//! heuristic derives its cost-per-unit rates from it.
//!
//! # Submodules
//!
//! - [`gather`] -- Take units from a location.
//! - [`deposit`] -- Put carried units into a location.

pub mod deposit;
pub mod gather;

use forage_types::{AgentId, LocationId, ResourceChange, ResourceId};
use forage_world::WorldState;
use serde::{Deserialize, Serialize};

pub use deposit::Deposit;
pub use gather::Gather;

use crate::error::PlannerError;

/// A world-changing step an agent can plan and perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Take units from a location.
    Gather(Gather),
    /// Put carried units into a location.
    Deposit(Deposit),
}

impl Action {
    /// Apply the action to a copy of `state` on behalf of `agent`.
    ///
    /// `Ok(None)` means "not applicable right now" (nothing to take,
    /// nothing carried). `Err` is a structural fault such as an unknown
    /// agent or location.
    pub fn perform(
        &self,
        state: &WorldState,
        agent: &AgentId,
    ) -> Result<Option<WorldState>, PlannerError> {
        match self {
            Self::Gather(g) => g.perform(state, agent),
            Self::Deposit(d) => d.perform(state, agent),
        }
    }

    /// Planning cost for `agent`. Never negative.
    pub fn cost(&self, _agent: &AgentId) -> f64 {
        let raw = match self {
            Self::Gather(g) => g.cost,
            Self::Deposit(d) => d.cost,
        };
        raw.max(0.0)
    }

    /// Human-readable summary.
    pub fn description(&self) -> String {
        match self {
            Self::Gather(g) => g.description(),
            Self::Deposit(d) => d.description(),
        }
    }

    /// Signed inventory changes this action makes at full amount.
    pub fn changes(&self, agent: &AgentId) -> Result<Vec<ResourceChange>, PlannerError> {
        match self {
            Self::Gather(g) => g.changes(agent),
            Self::Deposit(d) => d.changes(agent),
        }
    }

    /// Where the agent must stand to perform this action.
    pub const fn location(&self) -> Option<&LocationId> {
        match self {
            Self::Gather(g) => Some(&g.location),
            Self::Deposit(d) => Some(&d.location),
        }
    }

    /// The resource this action moves.
    pub const fn resource(&self) -> &ResourceId {
        match self {
            Self::Gather(g) => &g.resource,
            Self::Deposit(d) => &d.resource,
        }
    }

    /// Simulated seconds spent in the performing state.
    pub const fn duration(&self) -> f64 {
        match self {
            Self::Gather(g) => g.duration,
            Self::Deposit(d) => d.duration,
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.description())
    }
}

#[cfg(test)]
mod tests {
    use forage_types::{EntityKind, GridPos};
    use forage_world::{Agent, Location};

    use super::*;

    fn wood() -> ResourceId {
        ResourceId::new("wood")
    }

    fn ada() -> AgentId {
        AgentId::new("ada")
    }

    fn state(forest_stock: u32) -> WorldState {
        let mut s = WorldState::new();
        let forest = Location::new("forest", GridPos::new(0, 0))
            .with_stock(&wood(), forest_stock)
            .unwrap_or_else(|_| Location::new("forest", GridPos::new(0, 0)));
        let _ = s.insert_location(forest);
        let _ = s.insert_location(Location::new("stockpile", GridPos::new(5, 0)));
        let _ = s.insert_agent(Agent::new("ada", GridPos::new(0, 0)));
        s
    }

    fn gather(amount: u32) -> Action {
        Action::Gather(Gather {
            resource: wood(),
            amount,
            location: LocationId::new("forest"),
            cost: 10.0,
            duration: 2.0,
            required_tool: None,
        })
    }

    fn deposit(amount: u32) -> Action {
        Action::Deposit(Deposit {
            resource: wood(),
            amount,
            location: LocationId::new("stockpile"),
            cost: 1.0,
            duration: 1.0,
        })
    }

    #[test]
    fn gather_takes_at_most_available() {
        let before = state(4);
        let after = gather(10).perform(&before, &ada()).ok().flatten();
        assert!(after.is_some());
        let after = after.unwrap_or_default();
        assert_eq!(after.amount_at(EntityKind::Location, "forest", &wood()), 0);
        assert_eq!(after.amount_at(EntityKind::Agent, "ada", &wood()), 4);
        // Input snapshot untouched.
        assert_eq!(before.amount_at(EntityKind::Location, "forest", &wood()), 4);
    }

    #[test]
    fn gather_from_empty_location_not_applicable() {
        let result = gather(10).perform(&state(0), &ada());
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn gather_requires_tool() {
        let action = Action::Gather(Gather {
            resource: wood(),
            amount: 5,
            location: LocationId::new("forest"),
            cost: 10.0,
            duration: 2.0,
            required_tool: Some(ResourceId::new("axe")),
        });
        assert!(matches!(action.perform(&state(10), &ada()), Ok(None)));

        let mut equipped = state(10);
        let _ = equipped.adjust(EntityKind::Agent, "ada", &ResourceId::new("axe"), 1);
        assert!(matches!(action.perform(&equipped, &ada()), Ok(Some(_))));
    }

    #[test]
    fn deposit_without_goods_not_applicable() {
        assert!(matches!(deposit(5).perform(&state(10), &ada()), Ok(None)));
    }

    #[test]
    fn deposit_moves_carried_units() {
        let mut s = state(10);
        let _ = s.adjust(EntityKind::Agent, "ada", &wood(), 3);
        let after = deposit(5).perform(&s, &ada()).ok().flatten().unwrap_or_default();
        assert_eq!(after.amount_at(EntityKind::Location, "stockpile", &wood()), 3);
        assert_eq!(after.amount_at(EntityKind::Agent, "ada", &wood()), 0);
    }

    #[test]
    fn unknown_agent_is_structural_error() {
        let result = gather(1).perform(&state(5), &AgentId::new("ghost"));
        assert!(matches!(result, Err(PlannerError::World { .. })));
    }

    #[test]
    fn changes_match_perform_at_full_amount() {
        let s = state(50);
        for action in [gather(10), deposit(10)] {
            let mut start = s.clone();
            if matches!(action, Action::Deposit(_)) {
                let _ = start.adjust(EntityKind::Agent, "ada", &wood(), 10);
            }
            let performed = action.perform(&start, &ada());
            assert!(matches!(performed, Ok(Some(_))), "{action} should apply");
            let Ok(Some(after)) = performed else { continue };
            for change in action.changes(&ada()).unwrap_or_default() {
                let before = i64::from(start.amount_at(change.kind, &change.entity, &change.resource));
                let now = i64::from(after.amount_at(change.kind, &change.entity, &change.resource));
                assert_eq!(
                    now.checked_sub(before),
                    Some(i64::from(change.amount)),
                    "{action}: {change:?}"
                );
            }
        }
    }

    #[test]
    fn metadata_accessors() {
        let g = gather(10);
        assert_eq!(g.location(), Some(&LocationId::new("forest")));
        assert!((g.duration() - 2.0).abs() < f64::EPSILON);
        assert_eq!(g.description(), "gather 10 wood at forest");
    }
}
