mod stats;

pub use stats::*;
