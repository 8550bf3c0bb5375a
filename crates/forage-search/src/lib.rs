//! Resumable, iteration-budgeted best-first graph search.
//!
//! This crate knows nothing about worlds, agents, or resources. It runs A*
//! over any type implementing [`Node`], and it does so in bounded slices:
//! [`SearchEngine::run_iterations`] pops at most `n` nodes and then returns,
//! keeping the open set, closed set, and best solution for the next call.
//! That lets a caller spread one search across many simulation ticks.
//!
//! # Modules
//!
//! - [`node`] -- The [`Node`] capability trait.
//! - [`engine`] -- [`SearchEngine`] and [`SearchStatus`].
//! - [`error`] -- [`SearchError`].
//! - [`heap`] -- Indexed binary min-heap with decrease-key.

pub mod engine;
pub mod error;
pub mod heap;
pub mod node;

pub use engine::{SearchEngine, SearchStatus};
pub use error::SearchError;
pub use heap::IndexedHeap;
pub use node::Node;
