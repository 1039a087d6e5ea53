use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};

use super::tree::{RrtNode, RrtTree};
use super::types::Path;

/// Compact, serializable view of a grown tree for external tooling
/// (visualization, offline analysis). Encoded with bincode; the tree
/// itself never leaves the process in any other form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub nodes: Vec<RrtNode>,
    pub parents: Vec<Option<usize>>,
    pub path: Option<Path>,
}

impl TreeSnapshot {
    pub fn of(tree: &RrtTree) -> Self {
        Self {
            nodes: tree.nodes().to_vec(),
            parents: tree.parents().to_vec(),
            path: tree.path_found().cloned(),
        }
    }

    pub fn to_bytes(&self) -> DomainResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DomainError::SnapshotError(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> DomainResult<Self> {
        bincode::deserialize(bytes).map_err(|e| DomainError::SnapshotError(e.to_string()))
    }
}
