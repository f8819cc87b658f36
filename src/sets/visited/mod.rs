mod bitmask_set;
mod sparse_set;
mod visitor_set;

pub use bitmask_set::*;
pub use sparse_set::*;
pub use visitor_set::*;
