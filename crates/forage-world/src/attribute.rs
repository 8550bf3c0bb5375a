//! Attributes attached to resources and locations.
//!
//! An attribute is plain data here. The planner's action registry reads
//! attributes to derive concrete actions: a [`Attribute::Weight`] on a
//! resource yields gather actions, a [`Attribute::Capacity`] on a location
//! yields deposit actions.

use serde::{Deserialize, Serialize};

/// A property of a resource or a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Weight of one unit of a resource. Belongs on a [`Resource`](crate::Resource).
    Weight(u32),
    /// Weight a location accepts per deposit. Belongs on a [`Location`](crate::Location).
    Capacity(u32),
}

impl Attribute {
    /// Short name used in logs and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Weight(_) => "weight",
            Self::Capacity(_) => "capacity",
        }
    }
}

/// Find the first weight in an attribute list.
pub fn weight_of(attributes: &[Attribute]) -> Option<u32> {
    attributes.iter().find_map(|a| match a {
        Attribute::Weight(w) => Some(*w),
        Attribute::Capacity(_) => None,
    })
}

/// Find the first capacity in an attribute list.
pub fn capacity_of(attributes: &[Attribute]) -> Option<u32> {
    attributes.iter().find_map(|a| match a {
        Attribute::Capacity(c) => Some(*c),
        Attribute::Weight(_) => None,
    })
}
