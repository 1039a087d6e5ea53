use crate::common::DomainResult;

use super::workspace::Workspace;

/// Port the airspace domain depends on for loading workspace definitions
/// (bounds plus obstacle set) from wherever they are kept. Geographic
/// format parsing stays behind the adapter; the domain only ever sees the
/// deserialized workspace.
pub trait WorkspaceSource: Send + Sync {
    fn load_workspace(&self, name: &str) -> DomainResult<Workspace>;
}
