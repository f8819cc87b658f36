pub mod error;
pub mod fs;
pub mod generate;
pub mod search;
pub mod sets;
pub mod statistics;

pub use crate::{
    error::{LoadError, MalformedGraph, SearchError},
    search::{Edge, Graph, SearchBudget, SearchResult},
    statistics::Stats,
};
