//! Shared core types used across the graph, project and lockfile layers.

pub mod comparison;
pub mod framework;
pub mod version;

use std::fmt;

pub use comparison::StringComparison;
pub use framework::{Framework, FrameworkVersion};
pub use version::PackageVersion;

/// A package id paired with its resolved version.
///
/// Equality is exact on the id. [`IdentityIndex`](crate::graph::IdentityIndex)
/// folds id case when looking up content hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentity {
    pub id: String,
    pub version: PackageVersion,
}

impl PackageIdentity {
    pub fn new(id: impl Into<String>, version: PackageVersion) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.version)
    }
}
