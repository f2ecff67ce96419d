//! Projects a resolved graph onto a lock file.
//!
//! # Algorithm
//! - Index content hashes of the de-duplicated package libraries
//! - Order targets by framework, then runtime identifier (ordinal, RID-less first)
//! - Classify each package of a target as direct or transitive against the
//!   project's references for that framework
//! - Stable-sort each target's dependencies so direct ones come first,
//!   keeping graph order within each group
//!
//! The builder is a pure function of its inputs: re-running it on an
//! unchanged graph yields an equal [`LockFile`] and byte-identical output.

use crate::config::LockSettings;
use crate::error::{LockFileError, Result};
use crate::graph::{IdentityIndex, ResolvedGraph, ResolvedTarget, TargetLibrary};
use crate::project::{FrameworkSpec, ProjectSpec};
use crate::types::StringComparison;

use super::types::{InstallationType, LockFile, LockFileDependency, LockFileTarget};

/// Builds [`LockFile`]s with a fixed schema version.
#[derive(Debug, Clone)]
pub struct LockFileBuilder {
    lock_file_version: u32,
    id_comparison: StringComparison,
}

impl LockFileBuilder {
    /// Create a builder writing `lock_file_version`, comparing ids the way
    /// the host file system does.
    pub fn new(lock_file_version: u32) -> Self {
        Self {
            lock_file_version,
            id_comparison: StringComparison::for_current_os(),
        }
    }

    pub fn from_settings(settings: &LockSettings) -> Self {
        Self::new(settings.lock_file_version).with_id_comparison(settings.id_comparison.resolve())
    }

    /// Override how dependency ids are matched against direct references.
    pub fn with_id_comparison(mut self, id_comparison: StringComparison) -> Self {
        self.id_comparison = id_comparison;
        self
    }

    pub fn version(&self) -> u32 {
        self.lock_file_version
    }

    pub fn id_comparison(&self) -> StringComparison {
        self.id_comparison
    }

    /// Build the lock file for `graph` as restored for `project`.
    ///
    /// # Errors
    /// - [`LockFileError::DuplicateIdentity`] if two package libraries share an identity
    /// - [`LockFileError::FrameworkNotDeclared`] if a target's framework is not in the project
    /// - [`LockFileError::MissingIdentity`] if a target references an unknown package
    pub fn build(&self, graph: &ResolvedGraph, project: &ProjectSpec) -> Result<LockFile> {
        let index = IdentityIndex::from_libraries(&graph.libraries)?;

        let mut ordered: Vec<&ResolvedTarget> = graph.targets.iter().collect();
        ordered.sort_by(|a, b| {
            a.framework
                .cmp(&b.framework)
                .then_with(|| a.runtime_identifier.cmp(&b.runtime_identifier))
        });

        let targets = ordered
            .into_iter()
            .map(|target| self.build_target(target, project, &index))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            version = self.lock_file_version,
            targets = targets.len(),
            packages = index.len(),
            "Built lock file"
        );

        Ok(LockFile::new(self.lock_file_version).with_targets(targets))
    }

    fn build_target(
        &self,
        target: &ResolvedTarget,
        project: &ProjectSpec,
        index: &IdentityIndex,
    ) -> Result<LockFileTarget> {
        let spec = project
            .framework(&target.framework)
            .ok_or_else(|| LockFileError::FrameworkNotDeclared(target.framework.to_string()))?;

        let mut dependencies = target
            .packages()
            .map(|library| self.build_dependency(library, spec, index))
            .collect::<Result<Vec<_>>>()?;

        // Stable: graph order is kept within each group.
        dependencies.sort_by_key(LockFileDependency::installation_type);

        let built = LockFileTarget::new(target.framework.clone(), target.runtime_identifier.clone())
            .with_dependencies(dependencies);

        tracing::debug!(
            target = %built,
            direct = built.dependencies().iter().filter(|d| d.is_direct()).count(),
            total = built.dependencies().len(),
            "Locked target"
        );

        Ok(built)
    }

    fn build_dependency(
        &self,
        library: &TargetLibrary,
        spec: &FrameworkSpec,
        index: &IdentityIndex,
    ) -> Result<LockFileDependency> {
        let identity = library.identity();
        let content_hash = index.get(&identity)?.map(str::to_string);
        let installation_type = self.classify(spec, &identity.id);
        Ok(LockFileDependency::new(
            identity.id,
            Some(identity.version),
            content_hash,
            installation_type,
        ))
    }

    fn classify(&self, spec: &FrameworkSpec, id: &str) -> InstallationType {
        if spec.declares(id, self.id_comparison) {
            InstallationType::Direct
        } else {
            InstallationType::Transitive
        }
    }
}
