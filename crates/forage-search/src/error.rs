//! Error types for the `forage-search` crate.

/// Errors returned by [`SearchEngine`](crate::SearchEngine).
#[derive(Debug, thiserror::Error)]
pub enum SearchError<E>
where
    E: std::error::Error + 'static,
{
    /// The open set was exhausted without ever reaching the goal.
    ///
    /// This is an infeasibility result, not a fault: the caller is expected
    /// to recover (for example by asking for a smaller goal).
    #[error("no path to goal: open set exhausted")]
    NoPath,

    /// A node method failed. The current iteration batch was aborted.
    #[error("node error: {source}")]
    Node {
        /// The underlying node error.
        #[source]
        source: E,
    },
}

impl<E> SearchError<E>
where
    E: std::error::Error + 'static,
{
    /// Whether this error is the recoverable "no path" result.
    pub const fn is_no_path(&self) -> bool {
        matches!(self, Self::NoPath)
    }
}
