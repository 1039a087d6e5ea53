use serde::{Deserialize, Serialize};

use super::geometry::{bearing_between, distance_between};
use super::types::{Orientation2D, Path, Position2D, Waypoint};

/// A sampled configuration accepted into the search tree. Nodes are
/// immutable once attached; the parent relation lives in the tree, not
/// in the node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RrtNode {
    pub position: Position2D,
    pub orientation: Orientation2D,
    /// Tick at which the agent is expected to occupy this configuration,
    /// counted from the root (root = 0).
    pub expected_time_step: u32,
}

impl RrtNode {
    pub fn new(position: Position2D, orientation: Orientation2D, expected_time_step: u32) -> Self {
        Self {
            position,
            orientation,
            expected_time_step,
        }
    }
}

/// Arena of sampled nodes plus a parallel array of parent indices.
///
/// Node 0 is the root (the planning start configuration) and is the only
/// node without a parent. Parents always refer to nodes inserted earlier,
/// so the relation is acyclic by construction and path extraction is a
/// plain backward index walk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RrtTree {
    nodes: Vec<RrtNode>,
    parents: Vec<Option<usize>>,
    path_found: Option<Path>,
}

impl RrtTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the arena and record its parent. Validity of the
    /// parent handle is the caller's responsibility.
    pub fn add_node(&mut self, node: RrtNode, parent: Option<usize>) -> usize {
        self.nodes.push(node);
        self.parents.push(parent);
        self.nodes.len() - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_at(&self, index: usize) -> Option<&RrtNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[RrtNode] {
        &self.nodes
    }

    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Walk backward from the most recently accepted node to the root,
    /// reverse the sequence and store it as the found path. An empty tree
    /// yields an empty path; a root-only tree yields a one-waypoint path.
    pub fn generate_path(&mut self) -> &Path {
        let mut waypoints = Vec::new();
        if !self.nodes.is_empty() {
            let mut cursor = Some(self.nodes.len() - 1);
            while let Some(index) = cursor {
                let node = &self.nodes[index];
                waypoints.push(Waypoint {
                    position: node.position,
                    orientation: node.orientation,
                });
                cursor = self.parents[index];
            }
            waypoints.reverse();
        }
        self.path_found.insert(Path::new(waypoints))
    }

    /// The path produced by the last `generate_path` call, if any.
    pub fn path_found(&self) -> Option<&Path> {
        self.path_found.as_ref()
    }

    pub fn take_path(&mut self) -> Option<Path> {
        self.path_found.take()
    }

    /// Append the exact goal coordinate as the final waypoint of the found
    /// path. Only called once the goal has been reached within tolerance.
    pub fn append_goal_waypoint(&mut self, goal: Position2D) {
        if let Some(path) = self.path_found.as_mut() {
            let orientation = match path.last() {
                Some(last) if distance_between(&last.position, &goal) > f64::EPSILON => {
                    Orientation2D::new(bearing_between(&last.position, &goal))
                }
                Some(last) => last.orientation,
                None => Orientation2D::default(),
            };
            path.append_waypoint(Waypoint {
                position: goal,
                orientation,
            });
        }
    }
}
