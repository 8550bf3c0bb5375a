//! Goal-oriented action planning for the Forage simulation.
//!
//! This crate puts the world model from `forage-world` onto the generic
//! search engine from `forage-search`: world states become graph nodes,
//! actions become edges, and an admissible cost-per-unit heuristic guides
//! the search toward a goal snapshot produced by the goal engine.
//!
//! # Modules
//!
//! - [`actions`] -- The [`Action`] enum with [`Gather`] and [`Deposit`].
//! - [`attributes`] -- Attribute factories deriving actions from
//!   resource weights and location capacities.
//! - [`registry`] -- [`ActionRegistry`]: the resource x location cross-product.
//! - [`node`] -- [`GoapNode`], the search-graph adapter.
//! - [`heuristic`] -- Cost-per-unit remaining-cost estimate.
//! - [`plan`] -- [`Plan`] and search construction.
//! - [`goal`] -- [`Goal`], [`GoalLogic`], and [`HalvingGoal`].
//! - [`goal_state`] -- [`GoalState`]: exact (location, resource, amount)
//!   targets, zero included.
//! - [`error`] -- [`PlannerError`].

pub mod actions;
pub mod attributes;
pub mod error;
pub mod goal;
pub mod goal_state;
pub mod heuristic;
pub mod node;
pub mod plan;
pub mod registry;

pub use actions::{Action, Deposit, Gather};
pub use attributes::{ActionSettings, CreationParams, Holder, create_action};
pub use error::PlannerError;
pub use goal::{Goal, GoalLogic, HalvingGoal};
pub use goal_state::{GoalState, GoalTarget};
pub use node::{GoapNode, RunInfo};
pub use plan::{Plan, PlanSearch, start_search};
pub use registry::ActionRegistry;
