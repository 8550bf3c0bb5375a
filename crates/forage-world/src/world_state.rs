//! Copy-on-write world snapshots.
//!
//! A [`WorldState`] maps location names to [`Location`]s and agent names to
//! [`Agent`]s, and optionally carries the spatial [`Grid`]. Entries live
//! behind [`Arc`], so cloning a snapshot copies only the maps; the first
//! mutation of an entry through one of the `_mut` accessors clones that
//! entry alone ([`Arc::make_mut`]). Planning relies on this: every action
//! produces a new snapshot while its predecessor stays untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use forage_types::{AgentId, EntityKind, GridPos, LocationId, ResourceId};

use crate::agent::Agent;
use crate::canonical::CanonicalWorld;
use crate::error::WorldError;
use crate::grid::Grid;
use crate::location::Location;

/// A value snapshot of every location and agent.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    locations: BTreeMap<LocationId, Arc<Location>>,
    agents: BTreeMap<AgentId, Arc<Agent>>,
    grid: Option<Arc<Grid>>,
}

impl WorldState {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            locations: BTreeMap::new(),
            agents: BTreeMap::new(),
            grid: None,
        }
    }

    /// Builder: attach a spatial grid.
    #[must_use]
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(Arc::new(grid));
        self
    }

    /// The spatial grid, if any.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_deref()
    }

    // ------------------------------------------------------------------
    // Locations
    // ------------------------------------------------------------------

    /// Add a new location.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateLocation`] if the name is taken.
    pub fn insert_location(&mut self, location: Location) -> Result<(), WorldError> {
        if self.locations.contains_key(&location.id) {
            return Err(WorldError::DuplicateLocation(location.id));
        }
        self.locations
            .insert(location.id.clone(), Arc::new(location));
        Ok(())
    }

    /// Insert or replace a location.
    pub fn put_location(&mut self, location: Location) {
        self.locations
            .insert(location.id.clone(), Arc::new(location));
    }

    /// Look up a location.
    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id).map(AsRef::as_ref)
    }

    /// Look up a location, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`].
    pub fn require_location(&self, id: &LocationId) -> Result<&Location, WorldError> {
        self.location(id)
            .ok_or_else(|| WorldError::LocationNotFound(id.clone()))
    }

    /// Mutable access to a location, cloning it if shared.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::LocationNotFound`].
    pub fn location_mut(&mut self, id: &LocationId) -> Result<&mut Location, WorldError> {
        self.locations
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or_else(|| WorldError::LocationNotFound(id.clone()))
    }

    /// Iterate over locations in name order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values().map(AsRef::as_ref)
    }

    /// Number of locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // ------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------

    /// Add a new agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateAgent`] if the name is taken.
    pub fn insert_agent(&mut self, agent: Agent) -> Result<(), WorldError> {
        if self.agents.contains_key(&agent.id) {
            return Err(WorldError::DuplicateAgent(agent.id));
        }
        self.agents.insert(agent.id.clone(), Arc::new(agent));
        Ok(())
    }

    /// Insert or replace an agent.
    pub fn put_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.id.clone(), Arc::new(agent));
    }

    /// Look up an agent.
    pub fn agent(&self, id: &AgentId) -> Option<&Agent> {
        self.agents.get(id).map(AsRef::as_ref)
    }

    /// Look up an agent, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`].
    pub fn require_agent(&self, id: &AgentId) -> Result<&Agent, WorldError> {
        self.agent(id)
            .ok_or_else(|| WorldError::AgentNotFound(id.clone()))
    }

    /// Mutable access to an agent, cloning it if shared.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`].
    pub fn agent_mut(&mut self, id: &AgentId) -> Result<&mut Agent, WorldError> {
        self.agents
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or_else(|| WorldError::AgentNotFound(id.clone()))
    }

    /// Iterate over agents in name order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values().map(AsRef::as_ref)
    }

    /// Agent names in order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().cloned().collect()
    }

    /// Move an agent to a new cell.
    ///
    /// # Errors
    ///
    /// - [`WorldError::AgentNotFound`] for unknown agents.
    /// - [`WorldError::NotWalkable`] if a grid is attached and the cell is
    ///   blocked or out of bounds.
    pub fn set_agent_position(&mut self, id: &AgentId, pos: GridPos) -> Result<(), WorldError> {
        if let Some(grid) = self.grid.as_deref()
            && !grid.is_walkable(pos)
        {
            return Err(WorldError::NotWalkable(pos));
        }
        self.agent_mut(id)?.position = pos;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Inventory access by entity kind
    // ------------------------------------------------------------------

    /// Units of `resource` held by the named entity (zero if absent).
    pub fn amount_at(&self, kind: EntityKind, entity: &str, resource: &ResourceId) -> u32 {
        match kind {
            EntityKind::Location => self
                .locations
                .get(entity)
                .map_or(0, |l| l.inventory.amount_of(resource)),
            EntityKind::Agent => self
                .agents
                .get(entity)
                .map_or(0, |a| a.inventory.amount_of(resource)),
        }
    }

    /// Adjust the named entity's inventory by `delta`.
    ///
    /// Returns the new amount.
    ///
    /// # Errors
    ///
    /// - [`WorldError::LocationNotFound`] / [`WorldError::AgentNotFound`].
    /// - Any error from [`Inventory::adjust_amount`](crate::Inventory::adjust_amount).
    pub fn adjust(
        &mut self,
        kind: EntityKind,
        entity: &str,
        resource: &ResourceId,
        delta: i32,
    ) -> Result<u32, WorldError> {
        match kind {
            EntityKind::Location => {
                let loc = self.location_mut(&LocationId::new(entity))?;
                loc.inventory.adjust_amount(entity, resource, delta)
            }
            EntityKind::Agent => {
                let agent = self.agent_mut(&AgentId::new(entity))?;
                agent.inventory.adjust_amount(entity, resource, delta)
            }
        }
    }

    /// Move `amount` units from one entity to another as a single step.
    ///
    /// Either both sides change or neither does.
    ///
    /// # Errors
    ///
    /// Propagates lookup and inventory errors; on error `self` is unchanged.
    pub fn transfer(
        &mut self,
        from: (EntityKind, &str),
        to: (EntityKind, &str),
        resource: &ResourceId,
        amount: u32,
    ) -> Result<(), WorldError> {
        let delta = i32::try_from(amount).map_err(|_err| WorldError::ArithmeticOverflow)?;
        let negated = delta.checked_neg().ok_or(WorldError::ArithmeticOverflow)?;
        // Validate the destination before touching the source.
        match to.0 {
            EntityKind::Location => {
                self.require_location(&LocationId::new(to.1))?;
            }
            EntityKind::Agent => {
                self.require_agent(&AgentId::new(to.1))?;
            }
        }
        self.adjust(from.0, from.1, resource, negated)?;
        if let Err(err) = self.adjust(to.0, to.1, resource, delta) {
            // Restore the source; adding back what was just removed cannot fail.
            let _ = self.adjust(from.0, from.1, resource, delta);
            return Err(err);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Canonical form
    // ------------------------------------------------------------------

    /// Order-independent encoding of this snapshot.
    pub fn canonical(&self) -> CanonicalWorld {
        CanonicalWorld::from_state(self)
    }

    /// Lowercase hex SHA-256 of the canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Encoding`] if serialization fails.
    pub fn content_hash(&self) -> Result<String, WorldError> {
        self.canonical().content_hash()
    }
}
