use serde::{Deserialize, Serialize};

use crate::domains::planning::types::Position2D;

/// A static location a scout is assigned to reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub index: usize,
    pub position: Position2D,
}

impl Target {
    pub fn new(index: usize, position: Position2D) -> Self {
        Self { index, position }
    }
}
