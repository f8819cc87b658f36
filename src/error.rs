use thiserror::Error;

/// Rejection reasons for graph construction.
///
/// Construction is atomic: when any edge record is bad, no graph is built at
/// all. The variants carry the position of the offending record in the input
/// sequence so callers can point at the exact line/entry that was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MalformedGraph {
    // the endpoint fields are from_node/to_node rather than source/target:
    // thiserror reserves a field named `source` for the error cause
    #[error(
        "edge #{index} ({from_node} -> {to_node}) references a node outside of 0..{node_count}"
    )]
    EndpointOutOfRange {
        index: usize,
        from_node: usize,
        to_node: usize,
        node_count: usize,
    },

    #[error(
        "edge #{index} ({from_node} -> {to_node}) has weight {weight}, expected a finite non-negative number"
    )]
    InvalidWeight {
        index: usize,
        from_node: usize,
        to_node: usize,
        weight: f64,
    },
}

/// Failures of a single `longest_path_from` / `longest_path_between` call.
///
/// None of these leave residual state behind: the graph is immutable and the
/// visited set is scoped to the failed call and discarded with it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// The precondition check, before any search-scoped state exists.
    #[error("start node {start} is outside of 0..{node_count}")]
    InvalidStartNode { start: usize, node_count: usize },

    /// Same precondition, for the destination of a pinned-destination search.
    #[error("goal node {goal} is outside of 0..{node_count}")]
    InvalidGoalNode { goal: usize, node_count: usize },

    /// The expansion budget ran out. The best weight seen so far is reported
    /// rather than silently returned as if it were the true maximum.
    #[error("search exhausted its budget after {expanded} expansions (best so far: {best_so_far})")]
    Exhausted { expanded: u64, best_so_far: f64 },

    /// Cooperative cancellation via the abort flag.
    #[error("search cancelled (best so far: {best_so_far})")]
    Cancelled { best_so_far: f64 },
}

/// Anything that can go wrong while loading a graph file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad graph file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Malformed(#[from] MalformedGraph),
}
