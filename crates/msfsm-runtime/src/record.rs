//! Deployment record file.

use anyhow::{Context, Result};
use shared_types::DeploymentRecord;
use std::fs;
use std::path::Path;

/// Default output of `msfsm deploy`.
pub const DEFAULT_RECORD_FILE: &str = "deployment.json";

/// Writes `record` as pretty-printed JSON.
pub fn write_record(path: &Path, record: &DeploymentRecord) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Reads a record written by [`write_record`].
pub fn read_record(path: &Path) -> Result<DeploymentRecord> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a deployment record", path.display()))
}
