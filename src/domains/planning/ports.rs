use crate::common::DomainResult;

/// Port for storing and retrieving serialized tree snapshots in various
/// backends (filesystem today, object storage later).
pub trait TreeStore: Send + Sync {
    /// Save raw snapshot bytes under the given name
    fn save_tree_bytes(&self, name: &str, bytes: &[u8]) -> DomainResult<()>;
    /// Load raw snapshot bytes previously saved
    fn load_tree_bytes(&self, name: &str) -> DomainResult<Vec<u8>>;
    /// Delete a stored snapshot
    fn delete_tree(&self, name: &str) -> DomainResult<()>;
}
