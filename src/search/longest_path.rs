use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    error::SearchError,
    search::{Edge, Graph},
    sets::visited::{BitmaskSet, SparseSet, VisitorSet},
    statistics::Stats,
};

/// Past this many nodes a simple path no longer fits comfortably on the
/// thread's call stack, so the engine switches to the explicit-stack form.
const RECURSION_SAFE_NODES: usize = 2_048;

/// The maximum simple-path weight from a start node, with the node sequence
/// realizing it. `path[0]` is the start node; a search that cannot extend
/// anywhere returns weight `0.0` and the one-node path.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub weight: f64,
    pub path: Vec<usize>,
}

/// Optional limits on a single search. The default budget is unlimited,
/// which on a well-connected graph can mean factorially many expansions;
/// that is the nature of the problem, not a malfunction.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    /// Hard cap on node expansions before the search reports
    /// [`SearchError::Exhausted`].
    pub max_expansions: Option<u64>,

    /// Cooperative cancellation flag, polled at the top of every expansion.
    pub abort: Option<Arc<AtomicBool>>,

    /// Track visited nodes in a [`SparseSet`] instead of a [`BitmaskSet`].
    /// Worth it only when the graph is huge and the budget small.
    pub sparse_visited: bool,
}

impl Graph {
    /// Computes the weight of the longest simple path starting at `start`,
    /// by exhaustive backtracking search.
    ///
    /// "Simple" means no node is entered twice, and the path may stop at any
    /// node, so a start with no reachable unvisited neighbor yields exactly
    /// `0.0`. When several paths tie for the maximum, the one following the
    /// earliest edge order wins, which makes the reconstructed path
    /// deterministic.
    ///
    /// # Examples
    /// ```
    /// use meander::search::Graph;
    ///
    /// let graph =
    ///     Graph::from_edges(4, [(0, 1, 5.0), (1, 2, 3.0), (0, 2, 10.0), (2, 3, 1.0)]).unwrap();
    /// let result = graph.longest_path_from(0).unwrap();
    ///
    /// // The heavy direct edge extended to 3 beats the longer 0 -> 1 -> 2 -> 3 detour.
    /// assert_eq!(result.weight, 11.0);
    /// assert_eq!(result.path, vec![0, 2, 3]);
    /// ```
    pub fn longest_path_from(&self, start: usize) -> Result<SearchResult, SearchError> {
        self.longest_path_from_with(start, &SearchBudget::default(), &mut Stats::new())
    }

    /// Same as [`longest_path_from`](Graph::longest_path_from), with an
    /// explicit budget and a stats accumulator.
    pub fn longest_path_from_with(
        &self,
        start: usize,
        budget: &SearchBudget,
        stats: &mut Stats,
    ) -> Result<SearchResult, SearchError> {
        if start >= self.node_count() {
            return Err(SearchError::InvalidStartNode {
                start,
                node_count: self.node_count(),
            });
        }
        stats.bump_searches();

        let outcome = self.dispatch(start, None, budget, stats)?;
        let (weight, path) = outcome
            .expect("an unconstrained search always has the zero-edge path as a candidate");
        Ok(SearchResult { weight, path })
    }

    /// The pinned-destination variant: the longest simple path from `start`
    /// that terminates at `goal`, or `None` when no simple path connects
    /// them. Identical engine, except only paths ending at `goal` may update
    /// the running best, and `start == goal` is the zero-edge path.
    pub fn longest_path_between(
        &self,
        start: usize,
        goal: usize,
    ) -> Result<Option<SearchResult>, SearchError> {
        self.longest_path_between_with(start, goal, &SearchBudget::default(), &mut Stats::new())
    }

    /// Same as [`longest_path_between`](Graph::longest_path_between), with
    /// an explicit budget and a stats accumulator.
    pub fn longest_path_between_with(
        &self,
        start: usize,
        goal: usize,
        budget: &SearchBudget,
        stats: &mut Stats,
    ) -> Result<Option<SearchResult>, SearchError> {
        if start >= self.node_count() {
            return Err(SearchError::InvalidStartNode {
                start,
                node_count: self.node_count(),
            });
        }
        if goal >= self.node_count() {
            return Err(SearchError::InvalidGoalNode {
                goal,
                node_count: self.node_count(),
            });
        }
        stats.bump_searches();

        let outcome = self.dispatch(start, Some(goal), budget, stats)?;
        Ok(outcome.map(|(weight, path)| SearchResult { weight, path }))
    }

    fn dispatch(
        &self,
        start: usize,
        goal: Option<usize>,
        budget: &SearchBudget,
        stats: &mut Stats,
    ) -> Result<Option<(f64, Vec<usize>)>, SearchError> {
        if budget.sparse_visited {
            Explorer::new(self, SparseSet::new(), goal, budget, stats).run(start)
        } else {
            let visited = BitmaskSet::new(self.node_count());
            Explorer::new(self, visited, goal, budget, stats).run(start)
        }
    }
}

/// One in-progress search: the graph (shared, read-only), the visited set
/// (exclusively owned, alive for exactly this search) and the counters.
struct Explorer<'a, V: VisitorSet> {
    graph: &'a Graph,
    visited: V,
    goal: Option<usize>,
    budget: &'a SearchBudget,
    stats: &'a mut Stats,
    expanded: u64,
    best_seen: f64,
}

/// One suspended `explore` call of the explicit-stack engine.
struct Frame {
    node: usize,
    depth: usize,
    /// Accumulated weight from the start node to `node`.
    acc: f64,
    /// Next position to scan in `node`'s adjacency.
    edge_cursor: usize,
    /// Best (weight, path) over the alternatives examined so far. The path
    /// starts at the chosen neighbor; `node` is prepended when the frame
    /// finishes.
    best: Option<(f64, Vec<usize>)>,
}

impl<'a, V: VisitorSet> Explorer<'a, V> {
    fn new(
        graph: &'a Graph,
        visited: V,
        goal: Option<usize>,
        budget: &'a SearchBudget,
        stats: &'a mut Stats,
    ) -> Self {
        Explorer {
            graph,
            visited,
            goal,
            budget,
            stats,
            expanded: 0,
            best_seen: 0.0,
        }
    }

    fn run(&mut self, start: usize) -> Result<Option<(f64, Vec<usize>)>, SearchError> {
        if self.graph.node_count() <= RECURSION_SAFE_NODES {
            self.explore(start, 0.0, 0)
        } else {
            self.explore_iterative(start)
        }
    }

    /// Pay for one node expansion: poll the abort flag, then the budget.
    /// Runs before any mutation of the visited set, so a refusal here never
    /// leaves a mark behind.
    fn charge_expansion(&mut self) -> Result<(), SearchError> {
        if let Some(abort) = &self.budget.abort
            && abort.load(Ordering::Relaxed)
        {
            return Err(SearchError::Cancelled {
                best_so_far: self.best_seen,
            });
        }
        if let Some(cap) = self.budget.max_expansions
            && self.expanded >= cap
        {
            return Err(SearchError::Exhausted {
                expanded: self.expanded,
                best_so_far: self.best_seen,
            });
        }
        self.expanded += 1;
        self.stats.bump_expansions();
        Ok(())
    }

    /// Every entered node closes one complete simple path from the start,
    /// so entering is the moment the partial answer can improve. This is
    /// what `best_so_far` reports when the search gets cut short.
    fn note_candidate(&mut self, node: usize, acc: f64) {
        let counts = self.goal.is_none() || self.goal == Some(node);
        if counts && acc > self.best_seen {
            self.best_seen = acc;
        }
    }

    /// The "stop here" alternative. Always on the table for an unconstrained
    /// search (the traveler may stop at any intersection); for a pinned
    /// destination, stopping anywhere else is not a result at all.
    fn baseline(&self) -> Option<(f64, Vec<usize>)> {
        if self.goal.is_none() {
            Some((0.0, Vec::new()))
        } else {
            None
        }
    }

    /// Recursive backtracking. Returns the best (weight, path) over simple
    /// paths from `current` through unvisited nodes, the path including
    /// `current` itself, or `None` when a pinned goal is unreachable.
    ///
    /// The visited set holds exactly the ancestors of `current` on entry and
    /// is restored to that exact state on every exit, success or not, so an
    /// ancestor's sibling branches see `current` as available again.
    fn explore(
        &mut self,
        current: usize,
        acc: f64,
        depth: usize,
    ) -> Result<Option<(f64, Vec<usize>)>, SearchError> {
        self.charge_expansion()?;
        self.stats.observe_depth(depth);
        self.note_candidate(current, acc);

        if self.goal == Some(current) {
            // a simple path ending at the goal cannot be extended and
            // re-enter it later, so this is a leaf
            return Ok(Some((0.0, vec![current])));
        }

        self.visited.set(current);
        let outcome = self.scan_neighbors(current, acc, depth);
        self.visited.unset(current);
        outcome
    }

    fn scan_neighbors(
        &mut self,
        current: usize,
        acc: f64,
        depth: usize,
    ) -> Result<Option<(f64, Vec<usize>)>, SearchError> {
        let degree = self.graph.neighbors_of(current).len();
        self.stats.bump_edges(degree);

        let mut best = self.baseline();

        for i in 0..degree {
            let Edge { target, weight } = self.graph.neighbors_of(current)[i];
            if self.visited.get(target) {
                // extending here would enter a node twice
                continue;
            }

            if let Some((tail_weight, tail)) = self.explore(target, acc + weight, depth + 1)? {
                let candidate = weight + tail_weight;
                // strictly greater: among ties, the first edge order wins
                let improves = match &best {
                    None => true,
                    Some((current_best, _)) => candidate > *current_best,
                };
                if improves {
                    best = Some((candidate, tail));
                }
            }
        }

        Ok(best.map(|(weight, tail)| (weight, prepend(current, tail))))
    }

    /// The same search on a heap-allocated stack of [`Frame`]s, for graphs
    /// whose longest paths would not fit on the call stack. Mark/unmark
    /// ordering is identical to the recursive form: a node is marked when
    /// its frame is pushed and unmarked when its frame is popped.
    fn explore_iterative(
        &mut self,
        start: usize,
    ) -> Result<Option<(f64, Vec<usize>)>, SearchError> {
        let mut stack: Vec<Frame> = Vec::new();
        // the value a just-finished call hands back to its suspended parent
        let mut returned: Option<Option<(f64, Vec<usize>)>> = None;

        self.enter(start, 0.0, 0, &mut stack, &mut returned)?;

        while !stack.is_empty() {
            let mut next_hop: Option<(usize, f64, usize)> = None;
            {
                let frame = stack.last_mut().expect("loop guard: stack is non-empty");

                if let Some(child) = returned.take()
                    && let Some((tail_weight, tail)) = child
                {
                    // the child was reached through the edge just before the
                    // cursor; fold its result into this frame's best
                    let edge = self.graph.neighbors_of(frame.node)[frame.edge_cursor - 1];
                    let candidate = edge.weight + tail_weight;
                    let improves = match &frame.best {
                        None => true,
                        Some((current_best, _)) => candidate > *current_best,
                    };
                    if improves {
                        frame.best = Some((candidate, tail));
                    }
                }

                let edges = self.graph.neighbors_of(frame.node);
                while frame.edge_cursor < edges.len() {
                    let edge = edges[frame.edge_cursor];
                    frame.edge_cursor += 1;
                    if !self.visited.get(edge.target) {
                        next_hop = Some((edge.target, frame.acc + edge.weight, frame.depth + 1));
                        break;
                    }
                }
            }

            match next_hop {
                Some((target, acc, depth)) => {
                    self.enter(target, acc, depth, &mut stack, &mut returned)?;
                }
                None => {
                    // adjacency exhausted: this call finishes and backtracks
                    let frame = stack.pop().expect("loop guard: stack is non-empty");
                    self.visited.unset(frame.node);
                    returned =
                        Some(frame.best.map(|(weight, tail)| (weight, prepend(frame.node, tail))));
                }
            }
        }

        Ok(returned.expect("the start frame always produces a return value"))
    }

    /// The explicit-stack mirror of the top of [`explore`]: charge, account,
    /// then either short-circuit a goal leaf or mark the node and suspend it
    /// as a frame.
    fn enter(
        &mut self,
        node: usize,
        acc: f64,
        depth: usize,
        stack: &mut Vec<Frame>,
        returned: &mut Option<Option<(f64, Vec<usize>)>>,
    ) -> Result<(), SearchError> {
        self.charge_expansion()?;
        self.stats.observe_depth(depth);
        self.note_candidate(node, acc);

        if self.goal == Some(node) {
            *returned = Some(Some((0.0, vec![node])));
            return Ok(());
        }

        self.visited.set(node);
        self.stats.bump_edges(self.graph.neighbors_of(node).len());
        stack.push(Frame {
            node,
            depth,
            acc,
            edge_cursor: 0,
            best: self.baseline(),
        });
        Ok(())
    }
}

fn prepend(node: usize, tail: Vec<usize>) -> Vec<usize> {
    let mut path = Vec::with_capacity(tail.len() + 1);
    path.push(node);
    path.extend(tail);
    path
}
