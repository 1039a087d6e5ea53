use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::planning::types::Position2D;

/// A spatio-temporal exclusion zone attributed to one agent: other agents
/// whose planners yield to `owner_index` must stay `radius` away from
/// `position` at exactly `expected_time_step`.
///
/// Produced by an external registration process; consumed read-only by
/// planners for the lifetime of the run or until cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    pub id: String,
    pub owner_index: usize,
    pub position: Position2D,
    pub expected_time_step: u32,
    pub radius: f64,
    pub registered_at: DateTime<Utc>,
}

impl Conflict {
    pub fn new(owner_index: usize, position: Position2D, expected_time_step: u32, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_index,
            position,
            expected_time_step,
            radius,
            registered_at: Utc::now(),
        }
    }
}
