mod graph;
mod longest_path;

pub use graph::*;
pub use longest_path::*;
