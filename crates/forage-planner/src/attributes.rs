//! Attribute factories: turning resource and location properties into actions.
//!
//! A [`Attribute::Weight`] on a resource derives a [`Gather`] at a
//! candidate location; a [`Attribute::Capacity`] on a location derives a
//! [`Deposit`] of a candidate resource. A factory returns `Ok(None)` when
//! the pairing simply does not make sense (the location stocks none of the
//! resource, the resource is too heavy to carry or store). It returns an
//! error only when it is misused: attached to the wrong holder, or called
//! without the parameter it needs.

use forage_world::{Attribute, Location, Resource};
use serde::{Deserialize, Serialize};

use crate::actions::{Action, Deposit, Gather};
use crate::error::PlannerError;

/// Tunables applied when deriving actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSettings {
    /// Gather cost per unit of weight moved.
    pub gather_cost_per_weight: f64,
    /// Flat cost of one deposit.
    pub deposit_cost: f64,
    /// Weight an agent lifts in one gather.
    pub carry_limit: u32,
    /// Simulated seconds spent gathering.
    pub gather_seconds: f64,
    /// Simulated seconds spent depositing.
    pub deposit_seconds: f64,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            gather_cost_per_weight: 0.5,
            deposit_cost: 1.0,
            carry_limit: 20,
            gather_seconds: 2.0,
            deposit_seconds: 1.0,
        }
    }
}

/// What an attribute is attached to.
#[derive(Debug, Clone, Copy)]
pub enum Holder<'a> {
    /// A resource kind.
    Resource(&'a Resource),
    /// A location.
    Location(&'a Location),
}

impl Holder<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Resource(_) => "resource",
            Self::Location(_) => "location",
        }
    }
}

/// The candidate counterpart an attribute pairs its holder with.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreationParams<'a> {
    /// Candidate location (needed by `weight`).
    pub location: Option<&'a Location>,
    /// Candidate resource (needed by `capacity`).
    pub resource: Option<&'a Resource>,
}

/// Derive an action from `attribute` on `holder`.
pub fn create_action(
    attribute: &Attribute,
    holder: Holder<'_>,
    params: CreationParams<'_>,
    settings: &ActionSettings,
) -> Result<Option<Action>, PlannerError> {
    match (*attribute, holder) {
        (Attribute::Weight(weight), Holder::Resource(resource)) => {
            let location = params.location.ok_or(PlannerError::MissingParameter {
                attribute: attribute.name(),
                parameter: "location",
            })?;
            Ok(gather_action(resource, weight, location, settings))
        }
        (Attribute::Capacity(capacity), Holder::Location(location)) => {
            let resource = params.resource.ok_or(PlannerError::MissingParameter {
                attribute: attribute.name(),
                parameter: "resource",
            })?;
            Ok(deposit_action(resource, capacity, location, settings))
        }
        (_, other) => Err(PlannerError::WrongHolder {
            attribute: attribute.name(),
            holder: other.kind(),
        }),
    }
}

fn gather_action(
    resource: &Resource,
    weight: u32,
    location: &Location,
    settings: &ActionSettings,
) -> Option<Action> {
    if location.inventory.amount_of(&resource.id) == 0 {
        return None;
    }
    let amount = settings.carry_limit.checked_div(weight)?;
    if amount == 0 {
        return None;
    }
    let lifted = weight.checked_mul(amount)?;
    Some(Action::Gather(Gather {
        resource: resource.id.clone(),
        amount,
        location: location.id.clone(),
        cost: settings.gather_cost_per_weight * f64::from(lifted),
        duration: settings.gather_seconds,
        required_tool: None,
    }))
}

fn deposit_action(
    resource: &Resource,
    capacity: u32,
    location: &Location,
    settings: &ActionSettings,
) -> Option<Action> {
    let weight = resource.weight()?;
    let amount = capacity.checked_div(weight)?;
    if amount == 0 {
        return None;
    }
    Some(Action::Deposit(Deposit {
        resource: resource.id.clone(),
        amount,
        location: location.id.clone(),
        cost: settings.deposit_cost,
        duration: settings.deposit_seconds,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use forage_types::{GridPos, ResourceId};

    use super::*;

    fn wood() -> Resource {
        Resource::new("wood").with_attribute(Attribute::Weight(2))
    }

    fn forest() -> Location {
        Location::new("forest", GridPos::new(0, 0))
            .with_stock(&ResourceId::new("wood"), 50)
            .unwrap_or_else(|_| Location::new("forest", GridPos::new(0, 0)))
    }

    fn stockpile(capacity: u32) -> Location {
        Location::new("stockpile", GridPos::new(4, 4)).with_attribute(Attribute::Capacity(capacity))
    }

    #[test]
    fn weight_derives_gather() {
        let res = wood();
        let loc = forest();
        let params = CreationParams {
            location: Some(&loc),
            resource: None,
        };
        let action = create_action(
            &Attribute::Weight(2),
            Holder::Resource(&res),
            params,
            &ActionSettings::default(),
        );
        let Some(Action::Gather(g)) = action.unwrap() else {
            unreachable!("expected a gather");
        };
        // Carry limit 20 at weight 2.
        assert_eq!(g.amount, 10);
        assert!((g.cost - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weight_at_empty_location_not_applicable() {
        let res = wood();
        let loc = stockpile(20);
        let params = CreationParams {
            location: Some(&loc),
            resource: None,
        };
        let action = create_action(
            &Attribute::Weight(2),
            Holder::Resource(&res),
            params,
            &ActionSettings::default(),
        );
        assert!(matches!(action, Ok(None)));
    }

    #[test]
    fn too_heavy_for_capacity_not_applicable() {
        let boulder = Resource::new("boulder").with_attribute(Attribute::Weight(50));
        let loc = stockpile(20);
        let params = CreationParams {
            location: None,
            resource: Some(&boulder),
        };
        let action = create_action(
            &Attribute::Capacity(20),
            Holder::Location(&loc),
            params,
            &ActionSettings::default(),
        );
        assert!(matches!(action, Ok(None)));
    }

    #[test]
    fn capacity_derives_deposit() {
        let res = wood();
        let loc = stockpile(20);
        let params = CreationParams {
            location: None,
            resource: Some(&res),
        };
        let action = create_action(
            &Attribute::Capacity(20),
            Holder::Location(&loc),
            params,
            &ActionSettings::default(),
        );
        assert!(matches!(action, Ok(Some(Action::Deposit(ref d))) if d.amount == 10));
    }

    #[test]
    fn wrong_holder_is_error() {
        let loc = forest();
        let action = create_action(
            &Attribute::Weight(2),
            Holder::Location(&loc),
            CreationParams::default(),
            &ActionSettings::default(),
        );
        assert!(matches!(
            action,
            Err(PlannerError::WrongHolder {
                holder: "location",
                ..
            })
        ));
    }

    #[test]
    fn missing_parameter_is_error() {
        let res = wood();
        let action = create_action(
            &Attribute::Weight(2),
            Holder::Resource(&res),
            CreationParams::default(),
            &ActionSettings::default(),
        );
        assert!(matches!(
            action,
            Err(PlannerError::MissingParameter {
                parameter: "location",
                ..
            })
        ));
    }
}
