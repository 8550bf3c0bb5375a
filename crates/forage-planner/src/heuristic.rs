//! Cost-per-unit distance estimate between a world state and a goal.
//!
//! For every target the goal names, the estimate adds the units still to
//! move times the cheapest rate any available action achieves in that
//! direction at that location. Rates come from [`Action::changes`]: an
//! action's cost divided by the magnitude of the relevant change.
//!
//! Units delivered to goal locations have to come from somewhere. Per
//! resource, whatever the agent already carries and whatever the goal
//! itself requires to be taken out of other locations (already charged
//! above) is free; only the rest pays the cheapest agent-side acquire
//! rate. No unit is charged twice.
//!
//! Actions only ever move units at or below their nominal amount, so the
//! real per-unit cost is never below the rate used here and the estimate
//! never exceeds the true remaining cost. A direction no action can supply
//! yields `f64::INFINITY`.

use std::collections::BTreeMap;

use forage_types::{AgentId, EntityKind, ResourceId};
use forage_world::WorldState;

use crate::actions::Action;
use crate::error::PlannerError;
use crate::goal_state::GoalState;

/// Units a goal moves in and out of locations, for one resource.
#[derive(Debug, Default, Clone, Copy)]
struct Flow {
    into_locations: u32,
    out_of_locations: u32,
}

/// Estimate the remaining cost from `state` to `goal` for `agent`.
pub fn estimate(
    state: &WorldState,
    goal: &GoalState,
    agent: &AgentId,
    actions: &[Action],
) -> Result<f64, PlannerError> {
    let mut total = 0.0_f64;
    let mut flows: BTreeMap<&ResourceId, Flow> = BTreeMap::new();

    for target in goal.targets() {
        let location = target.location.as_str();
        let current = state.amount_at(EntityKind::Location, location, &target.resource);
        if current == target.amount {
            continue;
        }
        let increase = target.amount > current;
        let required = target.amount.abs_diff(current);

        let Some(rate) = cheapest_rate(
            actions,
            agent,
            EntityKind::Location,
            location,
            &target.resource,
            increase,
        )?
        else {
            return Ok(f64::INFINITY);
        };
        total += f64::from(required) * rate;

        let flow = flows.entry(&target.resource).or_default();
        if increase {
            flow.into_locations = flow.into_locations.saturating_add(required);
        } else {
            flow.out_of_locations = flow.out_of_locations.saturating_add(required);
        }
    }

    for (resource, flow) in flows {
        let carried = state.amount_at(EntityKind::Agent, agent.as_str(), resource);
        let missing = flow
            .into_locations
            .saturating_sub(carried)
            .saturating_sub(flow.out_of_locations);
        if missing == 0 {
            continue;
        }
        let Some(acquire) = cheapest_rate(
            actions,
            agent,
            EntityKind::Agent,
            agent.as_str(),
            resource,
            true,
        )?
        else {
            return Ok(f64::INFINITY);
        };
        total += f64::from(missing) * acquire;
    }
    Ok(total)
}

/// Lowest cost per unit among actions changing `resource` on `entity` in
/// the requested direction.
fn cheapest_rate(
    actions: &[Action],
    agent: &AgentId,
    kind: EntityKind,
    entity: &str,
    resource: &ResourceId,
    increase: bool,
) -> Result<Option<f64>, PlannerError> {
    let mut best: Option<f64> = None;
    for action in actions {
        for change in action.changes(agent)? {
            if !change.applies_to(kind, entity)
                || change.resource != *resource
                || (change.amount > 0) != increase
                || change.amount == 0
            {
                continue;
            }
            let rate = action.cost(agent) / f64::from(change.magnitude());
            best = Some(best.map_or(rate, |b| b.min(rate)));
        }
    }
    Ok(best)
}
