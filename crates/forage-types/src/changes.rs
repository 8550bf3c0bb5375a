//! Signed inventory deltas reported by actions.
//!
//! An action describes what it will do to the world as a list of
//! [`ResourceChange`] records. The planner heuristic reads these to derive
//! a cost-per-unit for each direction of change, so an action's reported
//! changes must agree with what performing it actually does.

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::ids::ResourceId;

/// One signed change to one entity's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Name of the entity whose inventory changes (a location or agent id).
    pub entity: String,
    /// Whether `entity` names a location or an agent.
    pub kind: EntityKind,
    /// The resource being moved.
    pub resource: ResourceId,
    /// Signed amount: positive adds to the entity, negative removes.
    pub amount: i32,
}

impl ResourceChange {
    /// Whether this change applies to the given entity of the given kind.
    pub fn applies_to(&self, kind: EntityKind, entity: &str) -> bool {
        self.kind == kind && self.entity == entity
    }

    /// Magnitude of the change as an unsigned count.
    pub const fn magnitude(&self) -> u32 {
        self.amount.unsigned_abs()
    }
}
