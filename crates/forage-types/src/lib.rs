//! Shared type definitions for the Forage planning simulation.
//!
//! This crate is the single source of truth for the small value types that
//! flow between the world model, the planner, and the behavior layer.
//!
//! # Modules
//!
//! - [`ids`] -- String-backed identifiers for resources, locations, agents
//! - [`enums`] -- Enumeration types ([`EntityKind`])
//! - [`geometry`] -- Integer grid coordinates ([`GridPos`])
//! - [`changes`] -- Signed inventory deltas reported by actions

pub mod changes;
pub mod enums;
pub mod geometry;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use changes::ResourceChange;
pub use enums::EntityKind;
pub use geometry::GridPos;
pub use ids::{AgentId, LocationId, ResourceId};
