//! Inventories: sorted, strictly positive resource counts.
//!
//! An [`Inventory`] is an ordered vector of `(resource, amount)` entries
//! kept sorted by resource id. Every stored amount is greater than zero;
//! an adjustment that brings an entry to zero deletes it. Lookups and
//! insertions use binary search, so the order never has to be repaired.
//!
//! All arithmetic is checked. An adjustment that would overflow or go
//! negative fails and leaves the inventory untouched.

use forage_types::ResourceId;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// One inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InventoryEntry {
    /// The resource held.
    pub resource: ResourceId,
    /// Units held. Always greater than zero.
    pub amount: u32,
}

/// A sorted collection of positive resource counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Create an empty inventory.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Units of `resource` held (zero if absent).
    pub fn amount_of(&self, resource: &ResourceId) -> u32 {
        self.search(resource)
            .ok()
            .and_then(|idx| self.entries.get(idx))
            .map_or(0, |e| e.amount)
    }

    /// Whether at least `amount` units of `resource` are held.
    pub fn has(&self, resource: &ResourceId, amount: u32) -> bool {
        self.amount_of(resource) >= amount
    }

    /// Add (positive `delta`) or remove (negative `delta`) units.
    ///
    /// Returns the new amount. An entry that reaches zero is deleted.
    ///
    /// # Errors
    ///
    /// - [`WorldError::InsufficientResource`] if removal would go below zero.
    /// - [`WorldError::ArithmeticOverflow`] if addition would exceed `u32::MAX`.
    ///
    /// `owner` only labels the error.
    pub fn adjust_amount(
        &mut self,
        owner: &str,
        resource: &ResourceId,
        delta: i32,
    ) -> Result<u32, WorldError> {
        let slot = self.search(resource);
        let current = slot
            .ok()
            .and_then(|idx| self.entries.get(idx))
            .map_or(0, |e| e.amount);

        let next = i64::from(current)
            .checked_add(i64::from(delta))
            .ok_or(WorldError::ArithmeticOverflow)?;
        if next < 0 {
            return Err(WorldError::InsufficientResource {
                entity: owner.to_owned(),
                resource: resource.clone(),
                requested: delta.unsigned_abs(),
                available: current,
            });
        }
        let next = u32::try_from(next).map_err(|_err| WorldError::ArithmeticOverflow)?;

        match (slot, next) {
            (Ok(idx), 0) => {
                self.entries.remove(idx);
            }
            (Ok(idx), amount) => {
                if let Some(entry) = self.entries.get_mut(idx) {
                    entry.amount = amount;
                }
            }
            (Err(_), 0) => {}
            (Err(idx), amount) => self.entries.insert(
                idx,
                InventoryEntry {
                    resource: resource.clone(),
                    amount,
                },
            ),
        }
        Ok(next)
    }

    /// Iterate over entries in resource-id order.
    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.iter()
    }

    /// Entries as a sorted slice.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Number of distinct resources held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all units held, or `None` on overflow.
    pub fn total_units(&self) -> Option<u32> {
        self.entries
            .iter()
            .try_fold(0_u32, |acc, e| acc.checked_add(e.amount))
    }

    fn search(&self, resource: &ResourceId) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|entry| entry.resource.cmp(resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wood() -> ResourceId {
        ResourceId::new("wood")
    }

    fn is_canonical(inv: &Inventory) -> bool {
        inv.entries().iter().all(|e| e.amount > 0)
            && inv
                .entries()
                .windows(2)
                .all(|w| matches!(w, [a, b] if a.resource < b.resource))
    }

    #[test]
    fn add_creates_entry() {
        let mut inv = Inventory::new();
        assert_eq!(inv.adjust_amount("t", &wood(), 5).ok(), Some(5));
        assert_eq!(inv.amount_of(&wood()), 5);
    }

    #[test]
    fn remove_to_zero_deletes_entry() {
        let mut inv = Inventory::new();
        let _ = inv.adjust_amount("t", &wood(), 5);
        assert_eq!(inv.adjust_amount("t", &wood(), -5).ok(), Some(0));
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_too_much_fails_without_change() {
        let mut inv = Inventory::new();
        let _ = inv.adjust_amount("t", &wood(), 3);
        let result = inv.adjust_amount("t", &wood(), -4);
        assert!(matches!(
            result,
            Err(WorldError::InsufficientResource { available: 3, .. })
        ));
        assert_eq!(inv.amount_of(&wood()), 3);
    }

    #[test]
    fn negative_on_absent_fails() {
        let mut inv = Inventory::new();
        assert!(inv.adjust_amount("t", &wood(), -1).is_err());
        assert!(inv.is_empty());
    }

    #[test]
    fn zero_delta_on_absent_stores_nothing() {
        let mut inv = Inventory::new();
        assert_eq!(inv.adjust_amount("t", &wood(), 0).ok(), Some(0));
        assert!(inv.is_empty());
    }

    #[test]
    fn overflow_is_rejected() {
        let mut inv = Inventory::new();
        let _ = inv.adjust_amount("t", &wood(), i32::MAX);
        let _ = inv.adjust_amount("t", &wood(), i32::MAX);
        let result = inv.adjust_amount("t", &wood(), i32::MAX);
        assert!(matches!(result, Err(WorldError::ArithmeticOverflow)));
    }

    #[test]
    fn entries_stay_sorted_and_positive() {
        let names = ["stone", "berries", "wood", "clay", "amber", "iron"];
        let deltas = [4, -2, 7, 3, -3, 1, 9, -9, 2, -1, 5, -6];
        let mut inv = Inventory::new();
        for (step, delta) in deltas.iter().enumerate() {
            let name = names.get(step % names.len()).copied().unwrap_or("wood");
            let _ = inv.adjust_amount("t", &ResourceId::new(name), *delta);
            assert!(is_canonical(&inv), "broken after step {step}: {inv:?}");
        }
        for name in names {
            let _ = inv.adjust_amount("t", &ResourceId::new(name), 2);
            let _ = inv.adjust_amount("t", &ResourceId::new(name), -1);
            assert!(is_canonical(&inv));
        }
    }

    #[test]
    fn total_units_sums_entries() {
        let mut inv = Inventory::new();
        let _ = inv.adjust_amount("t", &wood(), 4);
        let _ = inv.adjust_amount("t", &ResourceId::new("stone"), 6);
        assert_eq!(inv.total_units(), Some(10));
        assert_eq!(inv.len(), 2);
    }
}
