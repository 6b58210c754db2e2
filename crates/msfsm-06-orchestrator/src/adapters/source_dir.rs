//! Writes generated sources to `<dir>/<Contract>.sol`.

use crate::errors::OrchestratorError;
use crate::ports::SourceSink;
use msfsm_03_code_generation::GeneratedContract;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SourceDirectory {
    root: PathBuf,
}

impl SourceDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_for(&self, contract: &str) -> PathBuf {
        self.root.join(format!("{contract}.sol"))
    }
}

impl SourceSink for SourceDirectory {
    fn save(&self, contract: &GeneratedContract) -> Result<(), OrchestratorError> {
        let path = self.path_for(&contract.name);
        let failed = |e: std::io::Error| OrchestratorError::SourceOutput {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(&self.root).map_err(&failed)?;
        std::fs::write(&path, &contract.source).map_err(&failed)?;
        debug!(path = %path.display(), "Source written");
        Ok(())
    }
}
