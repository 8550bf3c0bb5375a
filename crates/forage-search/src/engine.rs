//! The resumable A* engine.
//!
//! # Algorithm
//!
//! Nodes are stored in an arena; the open set is an [`IndexedHeap`] of
//! arena indices ordered by `f = g + h`, with an id -> index map for
//! decrease-key. Each call to [`SearchEngine::run_iterations`] pops at most
//! `n` nodes:
//!
//! - A popped node whose `f` exceeds the best goal cost found so far is
//!   discarded without expansion. Heuristics are non-negative, so nothing
//!   below it can beat the incumbent.
//! - A popped node that reaches the goal becomes the new incumbent only if
//!   its `g` is strictly lower. The search does not stop there; it keeps
//!   draining the open set until nothing cheaper can remain.
//! - Any other node is closed and expanded. Successors already closed are
//!   skipped, successors with `f' >= best` are pruned, open successors are
//!   relaxed when `g'` improves, and new ones are inserted.
//!
//! When the open set empties the search is complete: with an incumbent it
//! reports [`SearchStatus::Found`], otherwise [`SearchError::NoPath`].

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::SearchError;
use crate::heap::IndexedHeap;
use crate::node::Node;

/// Outcome of a [`SearchEngine::run_iterations`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The open set is not empty yet; call again to continue.
    Pending,
    /// The open set is exhausted and a best solution was recorded.
    Found,
}

/// One arena slot.
#[derive(Debug)]
struct Record<N> {
    node: N,
    id: String,
    g: f64,
    h: f64,
    parent: Option<usize>,
}

impl<N> Record<N> {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// A* search state that survives across calls.
#[derive(Debug)]
pub struct SearchEngine<N: Node> {
    /// The target node.
    goal: N,
    /// Every node ever inserted, indexed by arena slot.
    records: Vec<Record<N>>,
    /// Open arena slots ordered by `f`.
    open: IndexedHeap,
    /// Node id -> arena slot, for open nodes only.
    open_ids: HashMap<String, usize>,
    /// Ids of expanded nodes.
    closed: HashSet<String>,
    /// Cost of the best goal-reaching path found so far.
    best_cost: f64,
    /// Arena slot of the best goal-reaching node.
    best: Option<usize>,
    /// Set once the open set is exhausted with a solution in hand.
    found_best: bool,
    /// Total nodes popped and processed across all calls.
    iterations: u64,
}

fn node_error<E>(source: E) -> SearchError<E>
where
    E: std::error::Error + 'static,
{
    SearchError::Node { source }
}

impl<N: Node> SearchEngine<N> {
    /// Seed a new search with `start` in the open set.
    ///
    /// # Errors
    ///
    /// Returns the node's error if the start node's id or heuristic cannot
    /// be computed.
    pub fn new(start: N, goal: N) -> Result<Self, N::Error> {
        let id = start.id()?;
        let h = start.heuristic(&goal)?;

        let mut open = IndexedHeap::new();
        open.push(0, h);
        let mut open_ids = HashMap::new();
        open_ids.insert(id.clone(), 0);

        Ok(Self {
            goal,
            records: vec![Record {
                node: start,
                id,
                g: 0.0,
                h,
                parent: None,
            }],
            open,
            open_ids,
            closed: HashSet::new(),
            best_cost: f64::INFINITY,
            best: None,
            found_best: false,
            iterations: 0,
        })
    }

    /// Process up to `n` nodes from the open set.
    ///
    /// Returns [`SearchStatus::Pending`] while the open set still holds
    /// nodes, and [`SearchStatus::Found`] once it is exhausted with a
    /// solution. All state persists between calls.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoPath`] when the open set is exhausted and the goal
    ///   was never reached.
    /// - [`SearchError::Node`] when a node method fails. The batch stops
    ///   immediately; nodes closed so far stay closed.
    pub fn run_iterations(&mut self, n: usize) -> Result<SearchStatus, SearchError<N::Error>> {
        if self.found_best {
            return Ok(SearchStatus::Found);
        }

        for _ in 0..n {
            let Some(slot) = self.open.pop() else {
                break;
            };
            self.step(slot)?;
        }

        if !self.open.is_empty() {
            return Ok(SearchStatus::Pending);
        }

        if self.best.is_some() {
            if !self.found_best {
                debug!(
                    cost = self.best_cost,
                    iterations = self.iterations,
                    closed = self.closed.len(),
                    "Search complete"
                );
            }
            self.found_best = true;
            Ok(SearchStatus::Found)
        } else {
            debug!(
                iterations = self.iterations,
                closed = self.closed.len(),
                "Search exhausted without reaching goal"
            );
            Err(SearchError::NoPath)
        }
    }

    /// Process one popped arena slot.
    fn step(&mut self, slot: usize) -> Result<(), SearchError<N::Error>> {
        let Some(current) = self.records.get(slot) else {
            return Ok(());
        };
        self.open_ids.remove(&current.id);

        if current.f() > self.best_cost {
            trace!(id = %current.id, f = current.f(), "Pruned on pop");
            return Ok(());
        }

        self.iterations = self.iterations.saturating_add(1);
        self.closed.insert(current.id.clone());

        if current.node.is_goal(&self.goal).map_err(node_error)? {
            if current.g < self.best_cost {
                debug!(cost = current.g, previous = self.best_cost, "Improved solution");
                self.best_cost = current.g;
                self.best = Some(slot);
            }
            return Ok(());
        }

        let g = current.g;
        let mut candidates = Vec::new();
        for successor in current.node.successors().map_err(node_error)? {
            let id = successor.id().map_err(node_error)?;
            if self.closed.contains(&id) {
                continue;
            }
            let g2 = g + successor.cost(&current.node);
            let h2 = successor.heuristic(&self.goal).map_err(node_error)?;
            if g2 + h2 >= self.best_cost {
                continue;
            }
            candidates.push(Record {
                node: successor,
                id,
                g: g2,
                h: h2,
                parent: Some(slot),
            });
        }

        for candidate in candidates {
            self.offer(candidate);
        }
        Ok(())
    }

    /// Insert a new open node, or relax an existing one if cheaper.
    fn offer(&mut self, candidate: Record<N>) {
        if let Some(&existing) = self.open_ids.get(&candidate.id) {
            let Some(record) = self.records.get_mut(existing) else {
                return;
            };
            if candidate.g < record.g {
                let f = candidate.f();
                *record = candidate;
                self.open.decrease(existing, f);
            }
            return;
        }

        let slot = self.records.len();
        self.open.push(slot, candidate.f());
        self.open_ids.insert(candidate.id.clone(), slot);
        self.records.push(candidate);
    }

    /// Node chain from the start to the best goal node found so far.
    ///
    /// Returns `None` while no goal-reaching node has been recorded.
    pub fn current_best_path(&self) -> Option<Vec<&N>> {
        let mut slot = self.best?;
        let mut path = Vec::new();
        loop {
            let record = self.records.get(slot)?;
            path.push(&record.node);
            match record.parent {
                Some(parent) => slot = parent,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    /// Cost of the best solution found so far.
    pub fn best_cost(&self) -> Option<f64> {
        self.best.map(|_| self.best_cost)
    }

    /// Whether the search has finished with a solution.
    pub const fn found_best(&self) -> bool {
        self.found_best
    }

    /// Total nodes processed (popped and not pruned) across all calls.
    pub const fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Number of nodes currently in the open set.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Number of closed node ids.
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// The goal this search is aiming for.
    pub const fn goal(&self) -> &N {
        &self.goal
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("poisoned node {0}")]
    struct Poisoned(String);

    #[derive(Debug, Default)]
    struct Graph {
        edges: BTreeMap<String, Vec<(String, f64)>>,
        heuristic: BTreeMap<String, f64>,
        poisoned: Option<String>,
    }

    impl Graph {
        fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
            self.edges
                .entry(from.to_owned())
                .or_default()
                .push((to.to_owned(), cost));
            self
        }
    }

    #[derive(Debug, Clone)]
    struct GraphNode {
        name: String,
        edge_cost: f64,
        graph: Arc<Graph>,
    }

    impl GraphNode {
        fn at(graph: &Arc<Graph>, name: &str) -> Self {
            Self {
                name: name.to_owned(),
                edge_cost: 0.0,
                graph: Arc::clone(graph),
            }
        }
    }

    impl Node for GraphNode {
        type Error = Poisoned;

        fn heuristic(&self, _goal: &Self) -> Result<f64, Poisoned> {
            Ok(self.graph.heuristic.get(&self.name).copied().unwrap_or(0.0))
        }

        fn id(&self) -> Result<String, Poisoned> {
            Ok(self.name.clone())
        }

        fn cost(&self, _predecessor: &Self) -> f64 {
            self.edge_cost
        }

        fn successors(&self) -> Result<Vec<Self>, Poisoned> {
            if self.graph.poisoned.as_deref() == Some(self.name.as_str()) {
                return Err(Poisoned(self.name.clone()));
            }
            Ok(self
                .graph
                .edges
                .get(&self.name)
                .map(|edges| {
                    edges
                        .iter()
                        .map(|(to, cost)| Self {
                            name: to.clone(),
                            edge_cost: *cost,
                            graph: Arc::clone(&self.graph),
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    fn names(engine: &SearchEngine<GraphNode>) -> Vec<String> {
        engine
            .current_best_path()
            .unwrap_or_default()
            .iter()
            .map(|n| n.name.clone())
            .collect()
    }

    fn diamond() -> Arc<Graph> {
        Arc::new(
            Graph::default()
                .edge("S", "A", 1.0)
                .edge("S", "B", 4.0)
                .edge("S", "G", 10.0)
                .edge("S", "D", 5.0)
                .edge("A", "G", 5.0)
                .edge("B", "G", 1.0)
                .edge("D", "X", 1.0),
        )
    }

    fn ladder(rungs: usize) -> Arc<Graph> {
        let mut graph = Graph::default();
        for i in 0..rungs {
            let from = format!("n{i}");
            graph = graph
                .edge(&from, &format!("n{}", i.saturating_add(1)), 2.0)
                .edge(&from, &format!("n{}", i.saturating_add(2)), 3.0)
                .edge(&from, &format!("side{i}"), 0.5);
        }
        Arc::new(graph)
    }

    #[test]
    fn finds_cheapest_path() {
        let graph = diamond();
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();
        let status = engine.run_iterations(100);
        assert!(matches!(status, Ok(SearchStatus::Found)));
        assert!(engine.found_best());
        assert!(approx(engine.best_cost(), 5.0));
        assert_eq!(names(&engine), vec!["S", "B", "G"]);
    }

    #[test]
    fn keeps_searching_after_goal_reached() {
        let graph = diamond();
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();

        // S, A, B, G: the goal is popped on the fourth iteration while D
        // (f == best) is still open.
        let status = engine.run_iterations(4);
        assert!(matches!(status, Ok(SearchStatus::Pending)));
        assert!(!engine.found_best());
        assert!(approx(engine.best_cost(), 5.0));
        assert_eq!(names(&engine), vec!["S", "B", "G"]);

        let status = engine.run_iterations(4);
        assert!(matches!(status, Ok(SearchStatus::Found)));
        assert!(engine.found_best());
    }

    #[test]
    fn resumable_matches_single_call() {
        let graph = ladder(8);
        let start = || GraphNode::at(&graph, "n0");
        let goal = || GraphNode::at(&graph, "n8");

        let mut sliced = SearchEngine::new(start(), goal()).unwrap();
        let mut sliced_status = None;
        for _ in 0..4 {
            sliced_status = Some(sliced.run_iterations(3).map_err(|e| e.to_string()));
        }

        let mut whole = SearchEngine::new(start(), goal()).unwrap();
        let whole_status = whole.run_iterations(12).map_err(|e| e.to_string());

        assert_eq!(sliced_status, Some(whole_status));
        assert_eq!(sliced.found_best(), whole.found_best());
        assert_eq!(sliced.best_cost().map(f64::to_bits), whole.best_cost().map(f64::to_bits));
        assert_eq!(names(&sliced), names(&whole));
        assert_eq!(sliced.iterations(), whole.iterations());
    }

    #[test]
    fn best_path_is_idempotent() {
        let graph = diamond();
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();
        let _ = engine.run_iterations(100);
        assert_eq!(names(&engine), names(&engine));
    }

    #[test]
    fn unreachable_goal_reports_no_path() {
        let graph = Arc::new(Graph::default().edge("S", "A", 1.0).edge("A", "S", 1.0));
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();

        let mut result = engine.run_iterations(1);
        while matches!(result, Ok(SearchStatus::Pending)) {
            result = engine.run_iterations(1);
        }
        assert!(result.as_ref().is_err_and(SearchError::is_no_path));
        assert!(!engine.found_best());
        assert!(engine.current_best_path().is_none());
        assert!(engine.best_cost().is_none());
    }

    #[test]
    fn infinite_heuristic_prunes_branch() {
        let mut graph = Graph::default().edge("S", "A", 1.0).edge("A", "G", 1.0);
        graph.heuristic.insert("A".to_owned(), f64::INFINITY);
        let graph = Arc::new(graph);
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();
        let result = engine.run_iterations(10);
        assert!(result.is_err_and(|e| e.is_no_path()));
    }

    #[test]
    fn node_errors_abort_the_batch() {
        let mut graph = Graph::default().edge("S", "A", 1.0).edge("A", "G", 1.0);
        graph.poisoned = Some("A".to_owned());
        let graph = Arc::new(graph);
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "S"), GraphNode::at(&graph, "G")).unwrap();
        let result = engine.run_iterations(10);
        assert!(matches!(result, Err(SearchError::Node { .. })));
        // S and A were both closed before the fault surfaced.
        assert_eq!(engine.closed_len(), 2);
    }

    #[test]
    fn start_at_goal_is_zero_cost() {
        let graph = diamond();
        let mut engine =
            SearchEngine::new(GraphNode::at(&graph, "G"), GraphNode::at(&graph, "G")).unwrap();
        assert!(matches!(engine.run_iterations(1), Ok(SearchStatus::Found)));
        assert!(approx(engine.best_cost(), 0.0));
        assert_eq!(names(&engine), vec!["G"]);
    }
}
