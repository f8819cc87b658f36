//! Specialized data structures for the backtracking search.
//!
//! # Submodules
//!
//! - [`visited`]: per-path visited-node tracking, dense (bitmask) or sparse
//!   (integer hash set)

pub mod visited;
