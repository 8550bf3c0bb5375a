//! Locations: named, positioned resource containers.

use forage_types::{GridPos, LocationId, ResourceId};
use serde::{Deserialize, Serialize};

use crate::attribute::{self, Attribute};
use crate::error::WorldError;
use crate::inventory::Inventory;

/// An addressable container of resources on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique name.
    pub id: LocationId,
    /// Grid cell the location occupies.
    pub position: GridPos,
    /// Resources currently stored here.
    pub inventory: Inventory,
    /// Attributes that drive action derivation (e.g. capacity).
    pub attributes: Vec<Attribute>,
}

impl Location {
    /// Create an empty location at `position`.
    pub fn new(id: impl Into<LocationId>, position: GridPos) -> Self {
        Self {
            id: id.into(),
            position,
            inventory: Inventory::new(),
            attributes: Vec::new(),
        }
    }

    /// Builder: attach an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Builder: seed the inventory with `amount` units of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ArithmeticOverflow`] if the amount does not
    /// fit the inventory's signed adjustment.
    pub fn with_stock(mut self, resource: &ResourceId, amount: u32) -> Result<Self, WorldError> {
        let delta = i32::try_from(amount).map_err(|_err| WorldError::ArithmeticOverflow)?;
        self.inventory
            .adjust_amount(self.id.as_str(), resource, delta)?;
        Ok(self)
    }

    /// Per-deposit weight limit, if the location accepts deposits.
    pub fn capacity(&self) -> Option<u32> {
        attribute::capacity_of(&self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_seeds_stock_and_capacity() {
        let wood = ResourceId::new("wood");
        let loc = Location::new("stockpile", GridPos::new(1, 2))
            .with_attribute(Attribute::Capacity(20))
            .with_stock(&wood, 7);
        assert!(loc.is_ok());
        let loc = loc.ok();
        assert_eq!(loc.as_ref().map(|l| l.inventory.amount_of(&wood)), Some(7));
        assert_eq!(loc.and_then(|l| l.capacity()), Some(20));
    }

    #[test]
    fn zero_stock_stores_nothing() {
        let loc = Location::new("empty", GridPos::default()).with_stock(&ResourceId::new("wood"), 0);
        assert!(loc.is_ok_and(|l| l.inventory.is_empty()));
    }
}
