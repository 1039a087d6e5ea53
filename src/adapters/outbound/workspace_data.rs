use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::{DomainError, DomainResult};
use crate::domains::airspace::ports::WorkspaceSource;
use crate::domains::airspace::Workspace;

/// Loads workspace definitions (bounds + obstacle set) from JSON files on
/// disk. Conversion from geographic formats happens upstream of this
/// adapter; the files it reads are already plain workspace data.
pub struct FilesystemWorkspaceSource {
    base: PathBuf,
}

impl FilesystemWorkspaceSource {
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| {
            if let Ok(v) = env::var("KESTREL_DATA_DIR") {
                PathBuf::from(v)
            } else {
                let cwd_default = Path::new("resources/workspaces");
                if cwd_default.exists() {
                    cwd_default.to_path_buf()
                } else {
                    PathBuf::from("/usr/share/kestrel-sim/workspaces")
                }
            }
        });
        Self { base }
    }
}

impl WorkspaceSource for FilesystemWorkspaceSource {
    fn load_workspace(&self, name: &str) -> DomainResult<Workspace> {
        let mut path = self.base.clone();
        path.push(name);
        let raw = fs::read_to_string(&path)
            .map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        let workspace: Workspace = serde_json::from_str(&raw)?;
        Ok(workspace)
    }
}
