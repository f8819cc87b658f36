use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{LoadError, MalformedGraph},
    search::Graph,
};

/// One edge record of the on-disk format, exactly the `(source, target,
/// weight)` triple the graph construction contract asks for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// The decoded contents of a graph file, not yet validated against the
/// construction contract. [`GraphFile::into_graph`] is where an edge
/// pointing outside `[0, node_count)` or carrying a non-finite weight gets
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    pub node_count: usize,
    pub edges: Vec<EdgeRecord>,
}

impl GraphFile {
    pub fn from_graph(graph: &Graph) -> Self {
        let edges = (0..graph.node_count())
            .flat_map(|source| {
                graph.neighbors_of(source).iter().map(move |edge| EdgeRecord {
                    source,
                    target: edge.target,
                    weight: edge.weight,
                })
            })
            .collect();

        GraphFile {
            node_count: graph.node_count(),
            edges,
        }
    }

    pub fn into_graph(self) -> Result<Graph, MalformedGraph> {
        Graph::from_edges(
            self.node_count,
            self.edges.into_iter().map(|e| (e.source, e.target, e.weight)),
        )
    }
}

/// Loads and validates a graph from a JSON file.
pub fn load_graph(path: &Path) -> Result<Graph, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let parsed: GraphFile = serde_json::from_reader(reader)?;
    let graph = parsed.into_graph()?;

    info!(
        path = %path.display(),
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Writes a graph back out in the same JSON format `load_graph` reads.
pub fn save_graph(path: &Path, graph: &Graph) -> Result<(), LoadError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &GraphFile::from_graph(graph))?;

    info!(
        path = %path.display(),
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        "graph saved"
    );
    Ok(())
}
