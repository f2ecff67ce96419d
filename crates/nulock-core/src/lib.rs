//! Nulock Core Library
//!
//! Builds deterministic package lock files from a resolved dependency graph
//! and writes them in the `nuget.lock.json` format.

pub mod config;
pub mod error;
pub mod graph;
pub mod lockfile;
pub mod project;
pub mod types;

pub use error::{LockFileError, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{IdComparison, LockSettings};

    // Inputs
    pub use crate::graph::{
        IdentityIndex, LibraryEntry, LibraryKind, ResolvedGraph, ResolvedTarget, TargetLibrary,
    };
    pub use crate::project::{DeclaredDependency, FrameworkSpec, ProjectSpec, RestoreMetadata};
    pub use crate::types::{Framework, PackageIdentity, PackageVersion, StringComparison};

    // Lock file
    pub use crate::lockfile::{
        InstallationType, LockFile, LockFileBuilder, LockFileDependency, LockFileFormat,
        LockFileTarget, is_lock_file_enabled, lock_file_path,
    };
}
