//! Agent bodies: the physical part of an agent that lives in the world.
//!
//! The planning half of an agent (its goal, plan, and state machine) lives
//! in `forage-core`. The world only tracks where an agent stands and what
//! it carries, which is everything an action needs to read or change.

use forage_types::{AgentId, GridPos};
use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;

/// An agent's position and carried goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique name.
    pub id: AgentId,
    /// Current grid cell.
    pub position: GridPos,
    /// Carried resources.
    pub inventory: Inventory,
}

impl Agent {
    /// Create an agent with empty hands at `position`.
    pub fn new(id: impl Into<AgentId>, position: GridPos) -> Self {
        Self {
            id: id.into(),
            position,
            inventory: Inventory::new(),
        }
    }
}
