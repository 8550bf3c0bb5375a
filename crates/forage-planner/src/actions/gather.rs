//! Gather: move units of a resource from a location into the agent's hands.

use forage_types::{AgentId, EntityKind, LocationId, ResourceChange, ResourceId};
use forage_world::WorldState;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Take up to `amount` units of `resource` from `location`.
///
/// Applicable when the location holds at least one unit and, if a tool is
/// required, the agent carries at least one unit of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gather {
    /// Resource to take.
    pub resource: ResourceId,
    /// Maximum units taken per performance.
    pub amount: u32,
    /// Where the resource is taken from.
    pub location: LocationId,
    /// Planning cost.
    pub cost: f64,
    /// Simulated seconds spent performing.
    pub duration: f64,
    /// Resource the agent must carry to gather, if any.
    pub required_tool: Option<ResourceId>,
}

impl Gather {
    /// Apply the gather to a copy of `state`.
    ///
    /// Returns `Ok(None)` when the action is not applicable.
    pub fn perform(
        &self,
        state: &WorldState,
        agent: &AgentId,
    ) -> Result<Option<WorldState>, PlannerError> {
        let body = state.require_agent(agent)?;
        if let Some(tool) = &self.required_tool
            && body.inventory.amount_of(tool) == 0
        {
            return Ok(None);
        }
        let available = state
            .require_location(&self.location)?
            .inventory
            .amount_of(&self.resource);
        let taken = self.amount.min(available);
        if taken == 0 {
            return Ok(None);
        }

        let mut next = state.clone();
        next.transfer(
            (EntityKind::Location, self.location.as_str()),
            (EntityKind::Agent, agent.as_str()),
            &self.resource,
            taken,
        )?;
        Ok(Some(next))
    }

    /// Inventory changes at full amount: location loses, agent gains.
    pub fn changes(&self, agent: &AgentId) -> Result<Vec<ResourceChange>, PlannerError> {
        let amount = i32::try_from(self.amount).map_err(|_err| PlannerError::ArithmeticOverflow)?;
        Ok(vec![
            ResourceChange {
                entity: self.location.as_str().to_owned(),
                kind: EntityKind::Location,
                resource: self.resource.clone(),
                amount: amount.checked_neg().ok_or(PlannerError::ArithmeticOverflow)?,
            },
            ResourceChange {
                entity: agent.as_str().to_owned(),
                kind: EntityKind::Agent,
                resource: self.resource.clone(),
                amount,
            },
        ])
    }

    /// Human-readable summary.
    pub fn description(&self) -> String {
        format!(
            "gather {} {} at {}",
            self.amount, self.resource, self.location
        )
    }
}
