//! Error types for the `forage-planner` crate.
//!
//! Infeasibility is not an error here: an action that cannot run returns
//! `Ok(None)` and a search that finds no plan reports
//! [`SearchError::NoPath`](forage_search::SearchError::NoPath). The
//! variants below are structural faults.

use forage_world::WorldError;

/// Errors that can occur while deriving actions, planning, or performing.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The world rejected a lookup or inventory change.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// An attribute was asked to derive an action from the wrong kind of holder.
    #[error("attribute {attribute} cannot be held by a {holder}")]
    WrongHolder {
        /// Attribute name.
        attribute: &'static str,
        /// Kind of holder it was attached to.
        holder: &'static str,
    },

    /// An attribute factory was called without a parameter it needs.
    #[error("attribute {attribute} requires parameter {parameter}")]
    MissingParameter {
        /// Attribute name.
        attribute: &'static str,
        /// Missing parameter name.
        parameter: &'static str,
    },

    /// An action amount does not fit a signed inventory delta.
    #[error("arithmetic overflow in planner calculation")]
    ArithmeticOverflow,
}
