use serde::{Deserialize, Serialize};

use crate::error::MalformedGraph;

/// One directed, weighted edge, owned by its source node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: usize,
    pub weight: f64,
}

/// A node is nothing but its outgoing adjacency, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    edges: Box<[Edge]>,
}

/// In-memory adjacency graph used for longest-simple-path search.
///
/// # Invariants
/// - `nodes[i]` represents node `i`; identities are dense in `[0, node_count)`.
/// - Every `Edge.target` is a valid index into `nodes`.
/// - Every `Edge.weight` is finite and non-negative.
/// - Immutable after construction, so it can be shared read-only across any
///   number of concurrent searches without synchronization.
///
/// Parallel edges between the same ordered pair of nodes are kept as
/// independent traversal options (this is a multigraph), and self-loops are
/// structurally legal even though no simple path can ever use one.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Builds a graph from a declared node count and an ordered sequence of
    /// `(source, target, weight)` triples.
    ///
    /// Validation is all-or-nothing: the first bad record fails the whole
    /// construction with a [`MalformedGraph`] naming it, rather than
    /// clamping or dropping it and handing back a graph that only mostly
    /// matches the input.
    ///
    /// # Examples
    /// ```
    /// use meander::search::Graph;
    ///
    /// let graph = Graph::from_edges(3, [(0, 1, 4.0), (1, 2, 2.0)]).unwrap();
    /// assert_eq!(graph.node_count(), 3);
    /// assert_eq!(graph.edge_count(), 2);
    ///
    /// assert!(Graph::from_edges(3, [(0, 5, 1.0)]).is_err());
    /// ```
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, MalformedGraph> {
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); node_count];

        for (index, (source, target, weight)) in edges.into_iter().enumerate() {
            if source >= node_count || target >= node_count {
                return Err(MalformedGraph::EndpointOutOfRange {
                    index,
                    from_node: source,
                    to_node: target,
                    node_count,
                });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(MalformedGraph::InvalidWeight {
                    index,
                    from_node: source,
                    to_node: target,
                    weight,
                });
            }

            adjacency[source].push(Edge { target, weight });
        }

        Ok(Graph {
            nodes: adjacency
                .into_iter()
                .map(|edges| Node {
                    edges: edges.into_boxed_slice(),
                })
                .collect(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// The outgoing edges of `node`, in the order they appeared in the input
    /// sequence. O(degree) to walk, stable across calls.
    ///
    /// # Panics
    ///
    /// Panics if `node >= node_count()` (violates the graph invariant; the
    /// public search entry points range-check their start node before ever
    /// getting here).
    pub fn neighbors_of(&self, node: usize) -> &[Edge] {
        &self.nodes[node].edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_constructs() {
        let graph = Graph::from_edges(0, []).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn nodes_without_edges_are_fine() {
        let graph = Graph::from_edges(4, [(0, 1, 1.0)]).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert!(graph.neighbors_of(2).is_empty());
        assert!(graph.neighbors_of(3).is_empty());
    }

    #[test]
    fn adjacency_preserves_input_order() {
        let graph = Graph::from_edges(4, [(0, 3, 1.0), (0, 1, 2.0), (0, 2, 3.0)]).unwrap();
        let targets: Vec<usize> = graph.neighbors_of(0).iter().map(|e| e.target).collect();
        assert_eq!(targets, vec![3, 1, 2]);
    }

    #[test]
    fn parallel_edges_are_not_deduplicated() {
        let graph = Graph::from_edges(2, [(0, 1, 1.0), (0, 1, 9.0), (0, 1, 1.0)]).unwrap();
        assert_eq!(graph.neighbors_of(0).len(), 3);
        assert_eq!(graph.neighbors_of(0)[1].weight, 9.0);
    }

    #[test]
    fn self_loops_are_structurally_legal() {
        let graph = Graph::from_edges(2, [(1, 1, 4.0)]).unwrap();
        assert_eq!(graph.neighbors_of(1), &[Edge { target: 1, weight: 4.0 }]);
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        // edge (0, 5, 1) with 3 nodes.
        let err = Graph::from_edges(3, [(0, 5, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            MalformedGraph::EndpointOutOfRange {
                index: 0,
                from_node: 0,
                to_node: 5,
                node_count: 3,
            }
        );
        assert_eq!(
            err.to_string(),
            "edge #0 (0 -> 5) references a node outside of 0..3"
        );
    }

    #[test]
    fn out_of_range_source_is_rejected() {
        let err = Graph::from_edges(3, [(0, 1, 1.0), (7, 1, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            MalformedGraph::EndpointOutOfRange {
                index: 1,
                from_node: 7,
                to_node: 1,
                node_count: 3,
            }
        );
    }

    #[test]
    fn bad_weights_are_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = Graph::from_edges(2, [(0, 1, bad)]);
            assert!(
                matches!(result, Err(MalformedGraph::InvalidWeight { index: 0, .. })),
                "weight {} should have been rejected",
                bad
            );
        }
    }

    #[test]
    fn zero_weight_is_allowed() {
        assert!(Graph::from_edges(2, [(0, 1, 0.0)]).is_ok());
    }

    #[test]
    fn rejection_reports_first_offending_record() {
        let err = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, -3.0), (2, 9, 1.0)]).unwrap_err();
        assert!(matches!(err, MalformedGraph::InvalidWeight { index: 1, .. }));
    }
}
