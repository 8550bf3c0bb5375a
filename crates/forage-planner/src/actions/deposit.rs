//! Deposit: move carried units of a resource into a location.

use forage_types::{AgentId, EntityKind, LocationId, ResourceChange, ResourceId};
use forage_world::WorldState;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Put up to `amount` carried units of `resource` into `location`.
///
/// Applicable when the agent carries at least one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Resource to put down.
    pub resource: ResourceId,
    /// Maximum units deposited per performance.
    pub amount: u32,
    /// Where the resource is put.
    pub location: LocationId,
    /// Planning cost.
    pub cost: f64,
    /// Simulated seconds spent performing.
    pub duration: f64,
}

impl Deposit {
    /// Apply the deposit to a copy of `state`.
    ///
    /// Returns `Ok(None)` when the agent carries none of the resource.
    pub fn perform(
        &self,
        state: &WorldState,
        agent: &AgentId,
    ) -> Result<Option<WorldState>, PlannerError> {
        let carried = state
            .require_agent(agent)?
            .inventory
            .amount_of(&self.resource);
        state.require_location(&self.location)?;
        let moved = self.amount.min(carried);
        if moved == 0 {
            return Ok(None);
        }

        let mut next = state.clone();
        next.transfer(
            (EntityKind::Agent, agent.as_str()),
            (EntityKind::Location, self.location.as_str()),
            &self.resource,
            moved,
        )?;
        Ok(Some(next))
    }

    /// Inventory changes at full amount: agent loses, location gains.
    pub fn changes(&self, agent: &AgentId) -> Result<Vec<ResourceChange>, PlannerError> {
        let amount = i32::try_from(self.amount).map_err(|_err| PlannerError::ArithmeticOverflow)?;
        Ok(vec![
            ResourceChange {
                entity: agent.as_str().to_owned(),
                kind: EntityKind::Agent,
                resource: self.resource.clone(),
                amount: amount.checked_neg().ok_or(PlannerError::ArithmeticOverflow)?,
            },
            ResourceChange {
                entity: self.location.as_str().to_owned(),
                kind: EntityKind::Location,
                resource: self.resource.clone(),
                amount,
            },
        ])
    }

    /// Human-readable summary.
    pub fn description(&self) -> String {
        format!(
            "deposit {} {} at {}",
            self.amount, self.resource, self.location
        )
    }
}
