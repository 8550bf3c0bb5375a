//! The capability set a graph node must provide to be searched.

/// A vertex in a searchable graph.
///
/// Implementations decide what "identity" means via [`id`](Node::id): two
/// nodes with the same id are the same vertex, and the engine deduplicates
/// and closes vertices by id. Every method that can fail returns the
/// implementation's own error type, which the engine propagates unchanged.
pub trait Node: Sized {
    /// Structural failure raised by node methods.
    type Error: std::error::Error + 'static;

    /// Estimated remaining cost from `self` to `goal`.
    ///
    /// Must be non-negative and never exceed the true remaining cost.
    /// Positive infinity means the goal is unreachable from here.
    fn heuristic(&self, goal: &Self) -> Result<f64, Self::Error>;

    /// Stable identity used for deduplication and the closed set.
    fn id(&self) -> Result<String, Self::Error>;

    /// Cost of the edge from `predecessor` to `self`. Must be non-negative.
    fn cost(&self, predecessor: &Self) -> f64;

    /// Nodes reachable in one step from `self`.
    fn successors(&self) -> Result<Vec<Self>, Self::Error>;

    /// Whether `self` reaches `goal`.
    ///
    /// Defaults to identity equality. Domains whose goals are partial
    /// descriptions (e.g. "at least these amounts here") override this.
    fn is_goal(&self, goal: &Self) -> Result<bool, Self::Error> {
        Ok(self.id()? == goal.id()?)
    }
}
