//! Project specification: declared frameworks, direct references and
//! restore settings.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{Framework, StringComparison};

/// A dependency the project declares explicitly for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredDependency {
    pub name: String,
    /// Requested version range as written in the project (informational).
    #[serde(default)]
    pub version_range: Option<String>,
}

impl DeclaredDependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_range: None,
        }
    }

    pub fn with_version_range(mut self, range: impl Into<String>) -> Self {
        self.version_range = Some(range.into());
        self
    }
}

/// Per-framework section of the project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FrameworkSpec {
    pub framework: Framework,
    #[serde(default)]
    pub dependencies: Vec<DeclaredDependency>,
}

impl FrameworkSpec {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: DeclaredDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// True if `id` is one of this framework's direct references.
    pub fn declares(&self, id: &str, comparison: StringComparison) -> bool {
        self.dependencies
            .iter()
            .any(|dependency| comparison.equals(&dependency.name, id))
    }
}

/// Lock file related restore settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreMetadata {
    /// Whether restore should be driven by the lock file.
    #[serde(default)]
    pub restore_with_lock_file: bool,
    /// Explicit lock file location; empty or absent means the default.
    #[serde(default)]
    pub lock_file_path: Option<PathBuf>,
}

/// The project being restored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub base_directory: PathBuf,
    #[serde(default)]
    pub restore: RestoreMetadata,
    #[serde(default)]
    pub frameworks: Vec<FrameworkSpec>,
}

impl ProjectSpec {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            ..Self::default()
        }
    }

    pub fn with_framework(mut self, framework: FrameworkSpec) -> Self {
        self.frameworks.push(framework);
        self
    }

    pub fn with_restore(mut self, restore: RestoreMetadata) -> Self {
        self.restore = restore;
        self
    }

    /// First framework section equivalent to `framework`.
    pub fn framework(&self, framework: &Framework) -> Option<&FrameworkSpec> {
        self.frameworks
            .iter()
            .find(|spec| &spec.framework == framework)
    }
}
