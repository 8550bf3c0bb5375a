//! Explicit action registry.
//!
//! The registry accumulates the cross-product of known resources and
//! locations. Adding a resource pairs its attributes with every known
//! location, and every known location's attributes with it; adding a
//! location does the same from the other side. Initialization code owns
//! the registry and passes it where actions are needed.

use forage_world::{Location, Resource, ResourceRegistry, WorldState};
use tracing::debug;

use crate::actions::Action;
use crate::attributes::{ActionSettings, CreationParams, Holder, create_action};
use crate::error::PlannerError;

/// Every action derivable from the registered resources and locations.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    settings: ActionSettings,
    resources: Vec<Resource>,
    locations: Vec<Location>,
    actions: Vec<Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub const fn new(settings: ActionSettings) -> Self {
        Self {
            settings,
            resources: Vec::new(),
            locations: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Build a registry from every resource and every location in `state`.
    pub fn from_world(
        settings: ActionSettings,
        resources: &ResourceRegistry,
        state: &WorldState,
    ) -> Result<Self, PlannerError> {
        let mut registry = Self::new(settings);
        for resource in resources.iter() {
            registry.add_resource(resource.clone())?;
        }
        for location in state.locations() {
            registry.add_location(location.clone())?;
        }
        Ok(registry)
    }

    /// Register a resource and derive its actions against known locations.
    ///
    /// Returns the number of actions added.
    pub fn add_resource(&mut self, resource: Resource) -> Result<usize, PlannerError> {
        let before = self.actions.len();
        for location in &self.locations {
            let derived = derive_pair(&resource, location, &self.settings)?;
            self.actions.extend(derived);
        }
        self.resources.push(resource);
        Ok(self.added_since(before))
    }

    /// Register a location and derive its actions against known resources.
    ///
    /// Returns the number of actions added.
    pub fn add_location(&mut self, location: Location) -> Result<usize, PlannerError> {
        let before = self.actions.len();
        for resource in &self.resources {
            let derived = derive_pair(resource, &location, &self.settings)?;
            self.actions.extend(derived);
        }
        self.locations.push(location);
        Ok(self.added_since(before))
    }

    /// All derived actions, in registration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of derived actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no actions have been derived.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn added_since(&self, before: usize) -> usize {
        self.actions.len().saturating_sub(before)
    }
}

/// Run every attribute of the resource and the location over the pair.
fn derive_pair(
    resource: &Resource,
    location: &Location,
    settings: &ActionSettings,
) -> Result<Vec<Action>, PlannerError> {
    let mut out = Vec::new();
    for attribute in &resource.attributes {
        let params = CreationParams {
            location: Some(location),
            resource: None,
        };
        if let Some(action) = create_action(attribute, Holder::Resource(resource), params, settings)? {
            out.push(action);
        }
    }
    for attribute in &location.attributes {
        let params = CreationParams {
            location: None,
            resource: Some(resource),
        };
        if let Some(action) = create_action(attribute, Holder::Location(location), params, settings)? {
            out.push(action);
        }
    }
    if !out.is_empty() {
        debug!(
            resource = %resource.id,
            location = %location.id,
            derived = out.len(),
            "Derived actions"
        );
    }
    Ok(out)
}
