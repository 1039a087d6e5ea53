//! Feasibility predicates consulted during tree growth: static obstacle
//! containment and priority-ordered inter-agent conflict checks.
//!
//! Only candidate node coordinates are tested, never the swept segment
//! between a node and its parent. Thin obstacles can therefore sit between
//! two accepted nodes without rejecting the edge; see DESIGN.md.

use serde::{Deserialize, Serialize};

use crate::domains::airspace::{Conflict, Obstacle};

use super::geometry::distance_between;
use super::tree::RrtNode;

/// True if the point lies inside any obstacle. Containment is
/// boundary-inclusive for circles and rectangles.
pub fn point_in_obstacles(obstacles: &[Obstacle], x: f64, y: f64) -> bool {
    obstacles.iter().any(|obstacle| obstacle.contains(x, y))
}

/// Point check applied to a candidate node's coordinate.
pub fn node_in_obstacles(obstacles: &[Obstacle], node: &RrtNode) -> bool {
    point_in_obstacles(obstacles, node.position.x, node.position.y)
}

/// True when the node enters the conflict's exclusion disc at exactly the
/// tick the conflict was registered for.
pub fn node_conflicts_with(node: &RrtNode, conflict: &Conflict) -> bool {
    node.expected_time_step == conflict.expected_time_step
        && distance_between(&node.position, &conflict.position) <= conflict.radius
}

/// Which registered conflicts constrain a given planner.
///
/// The stock ordering is asymmetric: a planner only yields to conflicts
/// attributed to higher-indexed agents. The reverse ordering is available
/// for experiments; the choice is a policy, not an accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictPolicy {
    #[default]
    YieldToHigherIndex,
    YieldToLowerIndex,
}

impl ConflictPolicy {
    pub fn applies(&self, owner_index: usize, current_index: usize) -> bool {
        match self {
            ConflictPolicy::YieldToHigherIndex => owner_index > current_index,
            ConflictPolicy::YieldToLowerIndex => owner_index < current_index,
        }
    }
}

/// Validate a candidate node against every conflict the policy makes
/// applicable to the planning agent.
pub fn violates_agent_conflicts(
    node: &RrtNode,
    conflicts: &[Conflict],
    agent_index: usize,
    policy: ConflictPolicy,
) -> bool {
    conflicts
        .iter()
        .filter(|conflict| policy.applies(conflict.owner_index, agent_index))
        .any(|conflict| node_conflicts_with(node, conflict))
}
