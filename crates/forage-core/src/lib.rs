//! Agent behavior, clock, tick cycle, and orchestration for the Forage
//! simulation.
//!
//! Each agent is split in two: its body (position and inventory) lives in
//! the shared [`WorldState`], while its [`Behavior`] owns the goal, the
//! current plan, and any search in flight. A tick hands every behavior a
//! frozen snapshot of the world for planning and the live world for
//! movement and action execution.
//!
//! # Modules
//!
//! - [`clock`] -- Simulation clock with tick counter and fixed step.
//! - [`config`] -- Configuration loading from `forage-config.yaml` into
//!   strongly-typed structs.
//! - [`behavior`] -- The Idle / Moving / Performing state machine.
//! - [`tick`] -- One tick over every agent.
//! - [`operator`] -- Stop requests, tick interval, and run limits.
//! - [`runner`] -- The bounded async simulation loop.
//!
//! [`WorldState`]: forage_world::WorldState
//! [`Behavior`]: behavior::Behavior

pub mod behavior;
pub mod clock;
pub mod config;
pub mod operator;
pub mod runner;
pub mod tick;
