//! Error types for nulock-core

use thiserror::Error;

use crate::types::PackageIdentity;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, LockFileError>;

/// Errors raised while building, naming or writing a lock file.
///
/// Inconsistent-input errors (`DuplicateIdentity`, `MissingIdentity`,
/// `FrameworkNotDeclared`) mean the resolved graph and the project
/// specification disagree; they are never recoverable at this layer.
#[derive(Debug, Error)]
pub enum LockFileError {
    #[error("Invalid package version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    #[error("Invalid target framework '{input}': {reason}")]
    InvalidFramework { input: String, reason: String },

    #[error("Malformed target name '{0}': expected {{framework}} or {{framework}}/{{runtime}}")]
    MalformedTargetName(String),

    #[error("Duplicate package identity in resolved libraries: {0}")]
    DuplicateIdentity(PackageIdentity),

    #[error("Package {0} is referenced by a target but missing from the resolved libraries")]
    MissingIdentity(PackageIdentity),

    #[error("Target framework '{0}' is not declared by the project")]
    FrameworkNotDeclared(String),

    #[error("Invalid lock settings: {0}")]
    Config(String),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
