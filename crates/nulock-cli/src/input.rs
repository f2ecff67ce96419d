//! Restore snapshot loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use nulock_core::graph::ResolvedGraph;
use nulock_core::project::ProjectSpec;

/// A project together with the graph restored for it.
#[derive(Debug, Deserialize)]
pub struct RestoreSnapshot {
    pub project: ProjectSpec,
    pub graph: ResolvedGraph,
}

impl RestoreSnapshot {
    /// Read a snapshot from a JSON file.
    ///
    /// A relative `baseDirectory` or `lockFilePath` is taken relative to the
    /// snapshot's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let mut snapshot: RestoreSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;

        let root = path.parent().unwrap_or_else(|| Path::new(""));
        let project = &mut snapshot.project;
        if project.base_directory.is_relative() {
            project.base_directory = root.join(&project.base_directory);
        }
        if let Some(lock_file) = project.restore.lock_file_path.as_mut() {
            if !lock_file.as_os_str().is_empty() && lock_file.is_relative() {
                *lock_file = root.join(&*lock_file);
            }
        }

        tracing::debug!(
            path = %path.display(),
            targets = snapshot.graph.targets.len(),
            libraries = snapshot.graph.libraries.len(),
            "Loaded restore snapshot"
        );
        Ok(snapshot)
    }
}
