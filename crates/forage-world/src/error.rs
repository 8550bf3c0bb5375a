//! Error types for the `forage-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use forage_types::{AgentId, GridPos, LocationId, ResourceId};

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A location was not found in the world state.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// An agent was not found in the world state.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// A resource was not found in the registry.
    #[error("resource not registered: {0}")]
    ResourceNotFound(ResourceId),

    /// A duplicate location was inserted where uniqueness is required.
    #[error("duplicate location id: {0}")]
    DuplicateLocation(LocationId),

    /// A duplicate agent was inserted where uniqueness is required.
    #[error("duplicate agent id: {0}")]
    DuplicateAgent(AgentId),

    /// A duplicate resource was registered.
    #[error("duplicate resource id: {0}")]
    DuplicateResource(ResourceId),

    /// An adjustment would have driven an inventory below zero.
    #[error("insufficient {resource} in {entity}: wanted {requested}, have {available}")]
    InsufficientResource {
        /// The entity whose inventory was adjusted.
        entity: String,
        /// The resource being removed.
        resource: ResourceId,
        /// Units the caller attempted to remove.
        requested: u32,
        /// Units actually held.
        available: u32,
    },

    /// A position lies outside the grid or on a blocked cell.
    #[error("position {0} is not walkable")]
    NotWalkable(GridPos),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,

    /// The world could not be canonically encoded for hashing.
    #[error("failed to encode world state: {source}")]
    Encoding {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
