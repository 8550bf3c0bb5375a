//! World model for the Forage simulation.
//!
//! This crate models the physical side of the simulation: resources and
//! their attributes, inventories, locations on a grid, agent bodies, and
//! the [`WorldState`] snapshot that the planner searches over.
//!
//! # Modules
//!
//! - [`attribute`] -- Properties ([`Attribute::Weight`], [`Attribute::Capacity`])
//!   that the planner turns into actions.
//! - [`error`] -- Error types for world operations.
//! - [`resource`] -- [`Resource`] definitions and the [`ResourceRegistry`].
//! - [`inventory`] -- Sorted, strictly positive resource counts.
//! - [`location`] -- [`Location`]: a named, positioned container.
//! - [`agent`] -- [`Agent`]: an agent's body (position and carried goods).
//! - [`grid`] -- Walkable grid with breadth-first path lookup.
//! - [`world_state`] -- Copy-on-write [`WorldState`] snapshots.
//! - [`canonical`] -- Order-independent encoding and content hashing.
//! - [`starting_world`] -- Default map with forest, quarry, bush, stockpile.

pub mod agent;
pub mod attribute;
pub mod canonical;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod location;
pub mod resource;
pub mod starting_world;
pub mod world_state;

// Re-export primary types at crate root.
pub use agent::Agent;
pub use attribute::Attribute;
pub use canonical::{CanonicalEntity, CanonicalWorld};
pub use error::WorldError;
pub use grid::Grid;
pub use inventory::{Inventory, InventoryEntry};
pub use location::Location;
pub use resource::{Resource, ResourceRegistry};
pub use starting_world::{StartingWorld, create_starting_world};
pub use world_state::WorldState;
