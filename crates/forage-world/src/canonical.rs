//! Canonical encoding and content hashing of world snapshots.
//!
//! Two snapshots with the same content must produce the same hash no
//! matter how they were built. [`CanonicalWorld`] flattens a
//! [`WorldState`] into sorted vectors (locations by name, agents by name,
//! inventories by resource) and hashes the JSON encoding with SHA-256.
//! The planner uses the hash as node identity, and the same encoding is
//! what a persistence layer would write.
//!
//! The grid and location attributes are static for a run and are left out.

use forage_types::GridPos;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::WorldError;
use crate::inventory::InventoryEntry;
use crate::world_state::WorldState;

/// One location or agent in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalEntity {
    /// Entity name.
    pub name: String,
    /// Grid cell.
    pub position: GridPos,
    /// Inventory entries sorted by resource.
    pub inventory: Vec<InventoryEntry>,
}

/// A world snapshot as sorted, serialisable vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalWorld {
    /// Locations sorted by name.
    pub locations: Vec<CanonicalEntity>,
    /// Agents sorted by name.
    pub agents: Vec<CanonicalEntity>,
}

impl CanonicalWorld {
    /// Flatten a world state.
    pub fn from_state(state: &WorldState) -> Self {
        let mut locations: Vec<CanonicalEntity> = state
            .locations()
            .map(|l| CanonicalEntity {
                name: l.id.as_str().to_owned(),
                position: l.position,
                inventory: sorted_entries(l.inventory.entries()),
            })
            .collect();
        let mut agents: Vec<CanonicalEntity> = state
            .agents()
            .map(|a| CanonicalEntity {
                name: a.id.as_str().to_owned(),
                position: a.position,
                inventory: sorted_entries(a.inventory.entries()),
            })
            .collect();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        Self { locations, agents }
    }

    /// Lowercase hex SHA-256 of the JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Encoding`] if serialization fails.
    pub fn content_hash(&self) -> Result<String, WorldError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(sha256_hex(&bytes))
    }
}

fn sorted_entries(entries: &[InventoryEntry]) -> Vec<InventoryEntry> {
    let mut out = entries.to_vec();
    out.sort_by(|a, b| a.resource.cmp(&b.resource));
    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
