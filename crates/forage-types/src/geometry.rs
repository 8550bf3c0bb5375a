//! Integer grid coordinates.
//!
//! Positions are cell coordinates on the world grid. All arithmetic is
//! checked or saturating so that coordinates near the `i32` limits never
//! panic.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl GridPos {
    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    pub const fn manhattan(self, other: Self) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// The four orthogonal neighbours, in a fixed order (E, W, S, N).
    ///
    /// Neighbours that would overflow `i32` are omitted.
    pub fn neighbors(self) -> Vec<Self> {
        [(1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .filter_map(|(dx, dy)| {
                Some(Self {
                    x: self.x.checked_add(dx)?,
                    y: self.y.checked_add(dy)?,
                })
            })
            .collect()
    }

    /// One orthogonal step from `self` toward `target`.
    ///
    /// Moves along x first, then y. Returns `self` when already there.
    pub const fn step_toward(self, target: Self) -> Self {
        if self.x < target.x {
            Self::new(self.x.saturating_add(1), self.y)
        } else if self.x > target.x {
            Self::new(self.x.saturating_sub(1), self.y)
        } else if self.y < target.y {
            Self::new(self.x, self.y.saturating_add(1))
        } else if self.y > target.y {
            Self::new(self.x, self.y.saturating_sub(1))
        } else {
            self
        }
    }
}

impl core::fmt::Display for GridPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
