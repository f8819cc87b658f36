/// Per-search counters, threaded through the engine by mutable reference.
///
/// Each worker thread owns its own `Stats` and the driver merges them once
/// the workers are joined, so no synchronization happens on the hot path.
#[derive(Debug, Clone, Copy)]
pub struct Stats {
    searches: usize,
    nodes_expanded: u64,
    edges_scanned: u64,
    deepest_path: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            searches: 0,
            nodes_expanded: 0,
            edges_scanned: 0,
            deepest_path: 0,
        }
    }

    /// Record that a new top-level search has been performed
    pub fn bump_searches(&mut self) {
        self.searches += 1
    }

    /// Record that a node was expanded (entered by the backtracking search)
    pub fn bump_expansions(&mut self) {
        self.nodes_expanded += 1
    }

    /// Record that a bunch of outgoing edges were taken into consideration
    /// while scanning a node's adjacency
    pub fn bump_edges(&mut self, edge_amount: usize) {
        self.edges_scanned += edge_amount as u64
    }

    /// Record the depth of the path currently being extended; keeps the max
    pub fn observe_depth(&mut self, depth: usize) {
        if depth > self.deepest_path {
            self.deepest_path = depth
        }
    }

    pub fn get_searches(&self) -> usize {
        self.searches
    }

    pub fn get_nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }

    pub fn get_edges_scanned(&self) -> u64 {
        self.edges_scanned
    }

    pub fn get_deepest_path(&self) -> usize {
        self.deepest_path
    }

    /// Combine two stats objects, typically accumulated by different worker
    /// threads of the same sweep.
    pub fn merge(&self, other: &Stats) -> Stats {
        Stats {
            searches: self.searches + other.searches,
            nodes_expanded: self.nodes_expanded + other.nodes_expanded,
            edges_scanned: self.edges_scanned + other.edges_scanned,
            deepest_path: self.deepest_path.max(other.deepest_path),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_initialized_to_zero() {
        let stats = Stats::new();
        assert_eq!(stats.get_searches(), 0);
        assert_eq!(stats.get_nodes_expanded(), 0);
        assert_eq!(stats.get_edges_scanned(), 0);
        assert_eq!(stats.get_deepest_path(), 0);
    }

    #[test]
    fn test_default_stats_initialized_to_zero() {
        let stats = Stats::default();
        assert_eq!(stats.get_searches(), 0);
        assert_eq!(stats.get_nodes_expanded(), 0);
    }

    #[test]
    fn test_bumps_increment_independently() {
        let mut stats = Stats::new();
        stats.bump_searches();
        stats.bump_expansions();
        stats.bump_expansions();
        stats.bump_edges(5);
        stats.bump_edges(2);

        assert_eq!(stats.get_searches(), 1);
        assert_eq!(stats.get_nodes_expanded(), 2);
        assert_eq!(stats.get_edges_scanned(), 7);
    }

    #[test]
    fn test_observe_depth_keeps_maximum() {
        let mut stats = Stats::new();
        stats.observe_depth(3);
        stats.observe_depth(1);
        stats.observe_depth(7);
        stats.observe_depth(4);
        assert_eq!(stats.get_deepest_path(), 7);
    }

    #[test]
    fn test_merge_sums_counts_and_maxes_depth() {
        let mut a = Stats::new();
        a.bump_searches();
        a.bump_expansions();
        a.bump_edges(10);
        a.observe_depth(4);

        let mut b = Stats::new();
        b.bump_searches();
        b.bump_searches();
        b.bump_expansions();
        b.bump_expansions();
        b.bump_edges(1);
        b.observe_depth(9);

        let merged = a.merge(&b);
        assert_eq!(merged.get_searches(), 3);
        assert_eq!(merged.get_nodes_expanded(), 3);
        assert_eq!(merged.get_edges_scanned(), 11);
        assert_eq!(merged.get_deepest_path(), 9);
    }
}
