//! Tick callback that reports progress through `tracing`.
//!
//! Behavior events are logged per agent at debug level. Every
//! `report_every` ticks the callback logs stockpile totals and, at trace
//! level, the canonical world as JSON.

use forage_core::behavior::BehaviorEvent;
use forage_core::runner::TickCallback;
use forage_core::tick::{SimulationState, TickSummary};
use forage_types::LocationId;
use forage_world::Location;
use tracing::{debug, info, trace, warn};

/// Callback that logs tick summaries and periodic stockpile reports.
pub struct LogCallback {
    stockpile: LocationId,
    report_every: u64,
}

impl LogCallback {
    /// Create a callback that reports on `stockpile` every `report_every`
    /// ticks (0 disables the periodic report).
    pub const fn new(stockpile: LocationId, report_every: u64) -> Self {
        Self {
            stockpile,
            report_every,
        }
    }

    fn report(&self, summary: &TickSummary, state: &SimulationState) {
        let Some(stockpile) = state.world.location(&self.stockpile) else {
            warn!(stockpile = %self.stockpile, "Stockpile missing from world");
            return;
        };
        info!(
            tick = summary.tick,
            elapsed_seconds = summary.elapsed_seconds,
            stockpile = %describe(stockpile),
            "Stockpile report"
        );
        match serde_json::to_string(&state.world.canonical()) {
            Ok(json) => trace!(tick = summary.tick, world = %json, "World snapshot"),
            Err(e) => warn!(error = %e, "Failed to encode world snapshot"),
        }
    }
}

impl TickCallback for LogCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        for (agent, events) in &summary.events {
            for event in events {
                match event {
                    BehaviorEvent::GaveUp => {
                        warn!(tick = summary.tick, agent = %agent, "Agent gave up");
                    }
                    BehaviorEvent::PlanAbandoned { action } => {
                        info!(
                            tick = summary.tick,
                            agent = %agent,
                            action = %action,
                            "Plan abandoned"
                        );
                    }
                    other => debug!(tick = summary.tick, agent = %agent, event = ?other, "Event"),
                }
            }
        }

        if self.report_every > 0 && summary.tick.checked_rem(self.report_every) == Some(0) {
            self.report(summary, state);
        }
    }
}

fn describe(location: &Location) -> String {
    let parts: Vec<String> = location
        .inventory
        .iter()
        .map(|entry| format!("{}={}", entry.resource, entry.amount))
        .collect();
    if parts.is_empty() {
        String::from("empty")
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use forage_types::{GridPos, ResourceId};

    use super::*;

    #[test]
    fn describe_lists_inventory() {
        let loc = Location::new("pile", GridPos::new(0, 0))
            .with_stock(&ResourceId::new("wood"), 4)
            .unwrap()
            .with_stock(&ResourceId::new("berries"), 2)
            .unwrap();
        assert_eq!(describe(&loc), "berries=2 wood=4");
    }

    #[test]
    fn describe_empty() {
        let loc = Location::new("pile", GridPos::new(0, 0));
        assert_eq!(describe(&loc), "empty");
    }
}
