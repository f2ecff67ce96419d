//! Resolved dependency graph handed in by the restore resolver.
//!
//! These are read-only inputs: one [`ResolvedTarget`] per framework and
//! runtime identifier pair, plus the de-duplicated library list that carries
//! content hashes. Nothing here performs resolution.

pub mod index;

use serde::Deserialize;

use crate::types::{Framework, PackageIdentity, PackageVersion};

pub use index::IdentityIndex;

/// What kind of library a resolved entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LibraryKind {
    /// A package restored from a feed.
    Package,
    /// Another project in the same build.
    Project,
    /// A project outside the restore graph.
    ExternalProject,
    /// A framework or assembly reference.
    Reference,
    /// Any kind this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// A library as it appears inside one resolved target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetLibrary {
    pub name: String,
    pub version: PackageVersion,
    #[serde(rename = "type")]
    pub kind: LibraryKind,
}

impl TargetLibrary {
    pub fn new(name: impl Into<String>, version: PackageVersion, kind: LibraryKind) -> Self {
        Self {
            name: name.into(),
            version,
            kind,
        }
    }

    pub fn package(name: impl Into<String>, version: PackageVersion) -> Self {
        Self::new(name, version, LibraryKind::Package)
    }

    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity::new(self.name.clone(), self.version.clone())
    }
}

/// A de-duplicated library entry with its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub version: PackageVersion,
    #[serde(rename = "type")]
    pub kind: LibraryKind,
    /// Base64 SHA-512 of the package, computed by the restore.
    #[serde(default)]
    pub sha512: Option<String>,
}

impl LibraryEntry {
    pub fn new(
        name: impl Into<String>,
        version: PackageVersion,
        kind: LibraryKind,
        sha512: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            kind,
            sha512,
        }
    }

    pub fn package(name: impl Into<String>, version: PackageVersion, sha512: impl Into<String>) -> Self {
        Self::new(name, version, LibraryKind::Package, Some(sha512.into()))
    }

    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity::new(self.name.clone(), self.version.clone())
    }
}

/// Resolution result for one framework and optional runtime identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTarget {
    pub framework: Framework,
    /// None for RID-less graphs.
    #[serde(default)]
    pub runtime_identifier: Option<String>,
    #[serde(default)]
    pub libraries: Vec<TargetLibrary>,
}

impl ResolvedTarget {
    pub fn new(framework: Framework, runtime_identifier: Option<String>) -> Self {
        Self {
            framework,
            runtime_identifier,
            libraries: Vec::new(),
        }
    }

    pub fn with_library(mut self, library: TargetLibrary) -> Self {
        self.libraries.push(library);
        self
    }

    /// Package-kind libraries in graph order.
    pub fn packages(&self) -> impl Iterator<Item = &TargetLibrary> {
        self.libraries
            .iter()
            .filter(|library| library.kind == LibraryKind::Package)
    }
}

/// The complete, immutable output of dependency resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResolvedGraph {
    #[serde(default)]
    pub targets: Vec<ResolvedTarget>,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: ResolvedTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_library(mut self, library: LibraryEntry) -> Self {
        self.libraries.push(library);
        self
    }

    /// De-duplicated package-kind libraries.
    pub fn packages(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.libraries
            .iter()
            .filter(|library| library.kind == LibraryKind::Package)
    }
}
