//! Default starting world for the Forage simulation.
//!
//! Three resources (wood, stone, berries) stocked at three source
//! locations, plus a stockpile that accepts deposits, all placed on a
//! 20x12 grid split by a wall with a single gap.

use forage_types::{GridPos, LocationId, ResourceId};
use tracing::debug;

use crate::attribute::Attribute;
use crate::error::WorldError;
use crate::grid::Grid;
use crate::location::Location;
use crate::resource::{Resource, ResourceRegistry};
use crate::world_state::WorldState;

/// Grid width in cells.
pub const GRID_WIDTH: i32 = 20;

/// Grid height in cells.
pub const GRID_HEIGHT: i32 = 12;

/// Column of the dividing wall.
const WALL_X: i32 = 13;

/// Rows `0..WALL_GAP` of the wall column are left open.
const WALL_GAP: i32 = 3;

/// The assembled starting world and the handles callers need.
#[derive(Debug, Clone)]
pub struct StartingWorld {
    /// Locations and grid; no agents yet.
    pub state: WorldState,
    /// Every resource kind.
    pub resources: ResourceRegistry,
    /// Where gathered goods are delivered.
    pub stockpile: LocationId,
    /// Cell next to the stockpile where agents appear.
    pub spawn: GridPos,
}

/// Create the default starting world.
///
/// # Errors
///
/// Returns [`WorldError`] if construction fails (should not happen with
/// the hard-coded data).
pub fn create_starting_world() -> Result<StartingWorld, WorldError> {
    let mut resources = ResourceRegistry::new();
    let wood = resources.register(Resource::new("wood").with_attribute(Attribute::Weight(2)))?;
    let stone = resources.register(Resource::new("stone").with_attribute(Attribute::Weight(5)))?;
    let berries =
        resources.register(Resource::new("berries").with_attribute(Attribute::Weight(1)))?;

    let mut grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
    for y in WALL_GAP..GRID_HEIGHT {
        grid.block(GridPos::new(WALL_X, y))?;
    }

    let mut state = WorldState::new().with_grid(grid);
    state.insert_location(source("forest", GridPos::new(2, 2), &wood, 200)?)?;
    state.insert_location(source("quarry", GridPos::new(17, 9), &stone, 120)?)?;
    state.insert_location(source("berry_bush", GridPos::new(3, 10), &berries, 80)?)?;

    let stockpile = LocationId::new("stockpile");
    state.insert_location(
        Location::new(stockpile.clone(), GridPos::new(9, 6)).with_attribute(Attribute::Capacity(20)),
    )?;

    debug!(
        locations = state.location_count(),
        resources = resources.len(),
        blocked = GRID_HEIGHT.saturating_sub(WALL_GAP),
        "Starting world built"
    );

    Ok(StartingWorld {
        state,
        resources,
        stockpile,
        spawn: GridPos::new(9, 5),
    })
}

fn source(
    name: &str,
    position: GridPos,
    resource: &ResourceId,
    amount: u32,
) -> Result<Location, WorldError> {
    Location::new(name, position).with_stock(resource, amount)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starting_world_builds() {
        let world = create_starting_world().unwrap();
        assert_eq!(world.state.location_count(), 4);
        assert_eq!(world.resources.len(), 3);
        assert_eq!(
            world
                .state
                .location(&world.stockpile)
                .and_then(Location::capacity),
            Some(20)
        );
    }

    #[test]
    fn every_location_reachable_from_spawn() {
        let world = create_starting_world().unwrap();
        let grid = world.state.grid().unwrap();
        for loc in world.state.locations() {
            assert!(
                grid.find_path(world.spawn, loc.position).is_some(),
                "{} unreachable",
                loc.id
            );
        }
    }

    #[test]
    fn quarry_needs_the_wall_gap() {
        let world = create_starting_world().unwrap();
        let grid = world.state.grid().unwrap();
        let quarry = GridPos::new(17, 9);
        let path = grid.find_path(world.spawn, quarry).unwrap_or_default();
        assert!(path.len() > usize::try_from(world.spawn.manhattan(quarry)).unwrap_or(0));
        assert!(path.iter().any(|p| p.x == WALL_X && p.y < WALL_GAP));
    }
}
