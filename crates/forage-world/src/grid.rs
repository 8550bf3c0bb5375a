//! Walkable grid and breadth-first path lookup.
//!
//! The grid is a rectangle of cells, some of them blocked. Movement is
//! orthogonal and every step costs the same, so a plain breadth-first
//! search finds a shortest path.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use forage_types::GridPos;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// A rectangular grid with impassable cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of columns. Valid x is `0..width`.
    pub width: i32,
    /// Number of rows. Valid y is `0..height`.
    pub height: i32,
    /// Impassable cells.
    pub blocked: BTreeSet<GridPos>,
}

impl Grid {
    /// Create an open grid.
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: BTreeSet::new(),
        }
    }

    /// Whether `pos` lies inside the grid.
    pub const fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Whether an agent may stand on `pos`.
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.blocked.contains(&pos)
    }

    /// Mark a cell as impassable.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotWalkable`] if the cell is outside the grid.
    pub fn block(&mut self, pos: GridPos) -> Result<(), WorldError> {
        if !self.in_bounds(pos) {
            return Err(WorldError::NotWalkable(pos));
        }
        self.blocked.insert(pos);
        Ok(())
    }

    /// Shortest walkable path from `from` to `to`.
    ///
    /// The returned cells exclude `from` and end with `to`; an empty path
    /// means the agent is already there. Returns `None` when either end is
    /// not walkable or no route exists.
    pub fn find_path(&self, from: GridPos, to: GridPos) -> Option<Vec<GridPos>> {
        if !self.is_walkable(from) || !self.is_walkable(to) {
            return None;
        }
        if from == to {
            return Some(Vec::new());
        }

        let mut prev: BTreeMap<GridPos, GridPos> = BTreeMap::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                break;
            }
            for next in current.neighbors() {
                if self.is_walkable(next) && visited.insert(next) {
                    prev.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        if !prev.contains_key(&to) {
            return None;
        }

        // Walk predecessors back to the start.
        let mut path = vec![to];
        let mut cursor = to;
        while let Some(&p) = prev.get(&cursor) {
            if p == from {
                break;
            }
            path.push(p);
            cursor = p;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_path_on_open_grid() {
        let grid = Grid::new(5, 5);
        let path = grid
            .find_path(GridPos::new(0, 0), GridPos::new(3, 0))
            .unwrap_or_default();
        assert_eq!(
            path,
            vec![GridPos::new(1, 0), GridPos::new(2, 0), GridPos::new(3, 0)]
        );
    }

    #[test]
    fn same_cell_is_empty_path() {
        let grid = Grid::new(3, 3);
        assert_eq!(
            grid.find_path(GridPos::new(1, 1), GridPos::new(1, 1)),
            Some(Vec::new())
        );
    }

    #[test]
    fn routes_around_wall() {
        let mut grid = Grid::new(5, 5);
        for y in 0..4 {
            assert!(grid.block(GridPos::new(2, y)).is_ok());
        }
        let path = grid
            .find_path(GridPos::new(0, 0), GridPos::new(4, 0))
            .unwrap_or_default();
        // Down to row 4, across, and back up: 4 + 4 + 4 steps.
        assert_eq!(path.len(), 12);
        assert!(path.iter().all(|p| grid.is_walkable(*p)));
        assert_eq!(path.last(), Some(&GridPos::new(4, 0)));
    }

    #[test]
    fn enclosed_target_has_no_path() {
        let mut grid = Grid::new(5, 5);
        for pos in GridPos::new(4, 4).neighbors() {
            let _ = grid.block(pos);
        }
        assert!(grid.find_path(GridPos::new(0, 0), GridPos::new(4, 4)).is_none());
    }

    #[test]
    fn blocking_out_of_bounds_errors() {
        let mut grid = Grid::new(2, 2);
        assert!(matches!(
            grid.block(GridPos::new(5, 5)),
            Err(WorldError::NotWalkable(_))
        ));
    }
}
