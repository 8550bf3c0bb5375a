//! Enumeration types shared across the workspace.

use serde::{Deserialize, Serialize};

/// The kind of entity that holds an inventory.
///
/// Used by [`ResourceChange`](crate::ResourceChange) to say whether a
/// delta applies to a location or to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A location (stockpile, forest, quarry, ...).
    Location,
    /// An agent carrying resources.
    Agent,
}

impl core::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Agent => f.write_str("agent"),
        }
    }
}
