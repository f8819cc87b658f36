//! Seeded random graph generation, for benchmarks and for tests that want
//! many small instances instead of a handful of handwritten ones.

use rand::{SeedableRng, rngs::StdRng, seq::index::sample};
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::search::Graph;

/// Generates a random directed instance: every node gets
/// `degree` outgoing edges to distinct targets (self-loops possible, they
/// are structurally legal and simply never help a path), with weights drawn
/// uniformly from `[0, max_weight)`.
///
/// Deterministic for a given `seed`, so two runs of a benchmark sweep see
/// the same instance.
///
/// # Panics
///
/// Panics if `max_weight` is not a positive finite number.
pub fn random_graph(node_count: usize, degree: usize, max_weight: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let weight_dist =
        Uniform::new(0.0, max_weight).expect("max_weight must be a positive finite number");

    let degree = degree.min(node_count);
    let mut edges = Vec::with_capacity(node_count * degree);
    for source in 0..node_count {
        for target in sample(&mut rng, node_count, degree).into_vec() {
            edges.push((source, target, weight_dist.sample(&mut rng)));
        }
    }

    debug!(node_count, degree, seed, "generated random graph");

    Graph::from_edges(node_count, edges)
        .expect("the generator only emits in-range targets and finite weights")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_node_and_edge_counts() {
        let graph = random_graph(10, 3, 5.0, 1);
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 30);
        for node in 0..10 {
            assert_eq!(graph.neighbors_of(node).len(), 3);
        }
    }

    #[test]
    fn same_seed_same_graph() {
        assert_eq!(random_graph(12, 4, 9.0, 99), random_graph(12, 4, 9.0, 99));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(random_graph(12, 4, 9.0, 1), random_graph(12, 4, 9.0, 2));
    }

    #[test]
    fn targets_are_distinct_per_node() {
        let graph = random_graph(20, 5, 1.0, 3);
        for node in 0..20 {
            let mut targets: Vec<usize> =
                graph.neighbors_of(node).iter().map(|e| e.target).collect();
            targets.sort_unstable();
            targets.dedup();
            assert_eq!(targets.len(), 5, "node {} has duplicate targets", node);
        }
    }

    #[test]
    fn degree_is_clamped_to_node_count() {
        let graph = random_graph(3, 10, 1.0, 5);
        for node in 0..3 {
            assert_eq!(graph.neighbors_of(node).len(), 3);
        }
    }

    #[test]
    fn weights_stay_in_range() {
        let graph = random_graph(15, 4, 2.5, 8);
        for node in 0..15 {
            for edge in graph.neighbors_of(node) {
                assert!((0.0..2.5).contains(&edge.weight));
            }
        }
    }
}
