//! File system I/O operations for loading and saving graphs.
//!
//! The on-disk format is JSON: a declared node count plus an ordered edge
//! list. Field-level validation is serde's job, so a record with a missing
//! or mistyped field fails the whole load instead of being patched up with
//! a sentinel value; range and weight validation then happen in graph
//! construction.

mod graph_file;

pub use graph_file::*;
