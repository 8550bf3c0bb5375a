//! Resource definitions and the registry that owns them.
//!
//! A [`Resource`] is an immutable identity plus a list of attributes.
//! Inventories key on [`ResourceId`], so two resources are the same
//! resource exactly when their ids match. The [`ResourceRegistry`] is the
//! arena that guarantees ids are unique.

use std::collections::BTreeMap;

use forage_types::ResourceId;
use serde::{Deserialize, Serialize};

use crate::attribute::{self, Attribute};
use crate::error::WorldError;

/// A kind of resource, e.g. wood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier.
    pub id: ResourceId,
    /// Attributes that drive action derivation.
    pub attributes: Vec<Attribute>,
}

impl Resource {
    /// Create a resource with no attributes.
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder: attach an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Weight of one unit, if the resource has a weight attribute.
    pub fn weight(&self) -> Option<u32> {
        attribute::weight_of(&self.attributes)
    }
}

/// Registry of every resource kind in the simulation.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<ResourceId, Resource>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    /// Register a resource.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateResource`] if the id is taken.
    pub fn register(&mut self, resource: Resource) -> Result<ResourceId, WorldError> {
        let id = resource.id.clone();
        if self.resources.contains_key(&id) {
            return Err(WorldError::DuplicateResource(id));
        }
        self.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Look up a resource by id.
    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Look up a resource by id, failing if it is not registered.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ResourceNotFound`] for unknown ids.
    pub fn require(&self, id: &ResourceId) -> Result<&Resource, WorldError> {
        self.resources
            .get(id)
            .ok_or_else(|| WorldError::ResourceNotFound(id.clone()))
    }

    /// Iterate over resources in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = ResourceRegistry::new();
        let id = registry.register(Resource::new("wood").with_attribute(Attribute::Weight(2)));
        assert!(id.is_ok());
        assert_eq!(
            registry.get(&ResourceId::new("wood")).and_then(Resource::weight),
            Some(2)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_resource_rejected() {
        let mut registry = ResourceRegistry::new();
        assert!(registry.register(Resource::new("wood")).is_ok());
        assert!(matches!(
            registry.register(Resource::new("wood")),
            Err(WorldError::DuplicateResource(_))
        ));
    }

    #[test]
    fn require_unknown_resource_errors() {
        let registry = ResourceRegistry::new();
        assert!(registry.require(&ResourceId::new("gold")).is_err());
    }

    #[test]
    fn weight_absent_without_attribute() {
        assert_eq!(Resource::new("air").weight(), None);
        let odd = Resource::new("odd").with_attribute(Attribute::Capacity(3));
        assert_eq!(odd.weight(), None);
    }
}
