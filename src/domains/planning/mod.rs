pub mod feasibility;
pub mod geometry;
pub mod planner;
pub mod ports;
pub mod snapshot;
pub mod tree;
pub mod types;

pub use feasibility::*;
pub use geometry::*;
pub use planner::*;
pub use ports::*;
pub use snapshot::*;
pub use tree::*;
pub use types::*;
