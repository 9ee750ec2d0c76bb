//! Loading of the workspace snapshot the host application starts from.

use std::fs;
use std::path::Path;

use rail_types::WorkspaceSnapshot;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("selected organization '{0}' is not in the organization list")]
    UnknownSelectedOrg(String),
    #[error("active project '{0}' is not in the project list")]
    UnknownActiveProject(String),
}

/// Reads and validates a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<WorkspaceSnapshot, SnapshotError> {
    let data = fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&data)?;
    debug!(
        path = %path.display(),
        projects = snapshot.projects.len(),
        organizations = snapshot.organizations.len(),
        "loaded workspace snapshot"
    );
    Ok(snapshot)
}

/// Parses a snapshot document.
///
/// When `selected_org_id` is absent the first organization is selected.
/// References to organizations or projects that do not exist are rejected.
pub fn parse_snapshot(data: &str) -> Result<WorkspaceSnapshot, SnapshotError> {
    let mut snapshot: WorkspaceSnapshot = serde_json::from_str(data)?;

    match snapshot.selected_org_id.as_deref() {
        Some(id) if !snapshot.organizations.iter().any(|org| org.id == id) => {
            return Err(SnapshotError::UnknownSelectedOrg(id.to_string()));
        }
        Some(_) => {}
        None => snapshot.selected_org_id = snapshot.organizations.first().map(|org| org.id.clone()),
    }

    if let Some(id) = snapshot.active_project_id.as_deref()
        && !snapshot.projects.iter().any(|project| project.id == id)
    {
        return Err(SnapshotError::UnknownActiveProject(id.to_string()));
    }

    Ok(snapshot)
}
