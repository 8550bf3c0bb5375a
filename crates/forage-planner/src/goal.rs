//! The goal engine: turning an open-ended goal into a concrete target.
//!
//! A [`Goal`] names a (location, resource) pair and delegates three
//! decisions to its [`GoalLogic`]: the default chunk to ask for, how to
//! shrink a chunk that could not be planned, and when to stop shrinking.
//! After `retries` failed attempts the goal asks for a chunk shrunk
//! `retries` times, or for nothing once the logic gives up.

use std::fmt;
use std::sync::Arc;

use forage_types::{LocationId, ResourceId};
use forage_world::WorldState;

use crate::error::PlannerError;
use crate::goal_state::GoalState;

/// Policy behind a goal's chunk size.
pub trait GoalLogic: fmt::Debug + Send + Sync {
    /// The default signed delta to request.
    fn chunk(&self) -> i32;

    /// Shrink a delta that could not be planned.
    fn fallback(&self, delta: i32) -> i32;

    /// Whether a delta is too small to pursue.
    fn should_give_up(&self, delta: i32) -> bool;
}

/// Fixed chunk, halved on every fallback, abandoned below a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalvingGoal {
    /// Default delta.
    pub chunk: i32,
    /// Smallest magnitude worth planning for.
    pub min_chunk: u32,
}

impl GoalLogic for HalvingGoal {
    fn chunk(&self) -> i32 {
        self.chunk
    }

    fn fallback(&self, delta: i32) -> i32 {
        delta.checked_div(2).unwrap_or(0)
    }

    fn should_give_up(&self, delta: i32) -> bool {
        delta == 0 || delta.unsigned_abs() < self.min_chunk
    }
}

/// A named target amount of one resource at one location.
#[derive(Debug, Clone)]
pub struct Goal {
    /// Display name.
    pub name: String,
    /// Where the resource should end up.
    pub location: LocationId,
    /// Which resource.
    pub resource: ResourceId,
    logic: Arc<dyn GoalLogic>,
}

impl Goal {
    /// Create a goal.
    pub fn new(
        name: impl Into<String>,
        location: LocationId,
        resource: ResourceId,
        logic: Arc<dyn GoalLogic>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            resource,
            logic,
        }
    }

    /// The delta to pursue after `retries` failed attempts.
    ///
    /// Returns `None` as soon as the logic gives up.
    pub fn get_delta(&self, retries: u32) -> Option<i32> {
        let mut delta = self.logic.chunk();
        for _ in 0..retries {
            delta = self.logic.fallback(delta);
            if self.logic.should_give_up(delta) {
                return None;
            }
        }
        Some(delta)
    }

    /// A goal snapshot targeting only this goal's (location, resource)
    /// pair, at the current amount plus the delta for `retries`.
    ///
    /// The target is clamped at zero, so a negative delta larger than the
    /// stock asks for the location to be emptied. Returns `Ok(None)` only
    /// if the logic gives up.
    pub fn get_goal_chunk(
        &self,
        state: &WorldState,
        retries: u32,
    ) -> Result<Option<GoalState>, PlannerError> {
        let Some(delta) = self.get_delta(retries) else {
            return Ok(None);
        };
        let location = state.require_location(&self.location)?;
        let existing = location.inventory.amount_of(&self.resource);
        let desired = i64::from(existing)
            .checked_add(i64::from(delta))
            .ok_or(PlannerError::ArithmeticOverflow)?
            .max(0);
        let desired = u32::try_from(desired).map_err(|_err| PlannerError::ArithmeticOverflow)?;

        Ok(Some(GoalState::new().with_target(
            location.id.clone(),
            self.resource.clone(),
            desired,
        )))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} at {})", self.name, self.resource, self.location)
    }
}
