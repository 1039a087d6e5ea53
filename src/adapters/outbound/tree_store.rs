use std::env;
use std::fs;
use std::path::PathBuf;

use crate::common::{DomainError, DomainResult};
use crate::domains::planning::ports::TreeStore;

/// Stores serialized tree snapshots as flat files, one per name, for
/// external visualization tooling to pick up.
pub struct FilesystemTreeStore {
    base: PathBuf,
}

impl FilesystemTreeStore {
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var("KESTREL_TREE_DIR") {
                PathBuf::from(v)
            } else {
                PathBuf::from("resources/trees")
            }
        });
        Self { base }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        let mut path = self.base.clone();
        path.push(name);
        path
    }
}

impl TreeStore for FilesystemTreeStore {
    fn save_tree_bytes(&self, name: &str, bytes: &[u8]) -> DomainResult<()> {
        if !self.base.exists() {
            fs::create_dir_all(&self.base)
                .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        }
        fs::write(self.path_for(name), bytes)
            .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))
    }

    fn load_tree_bytes(&self, name: &str) -> DomainResult<Vec<u8>> {
        fs::read(self.path_for(name))
            .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))
    }

    fn delete_tree(&self, name: &str) -> DomainResult<()> {
        fs::remove_file(self.path_for(name))
            .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))
    }
}
