//! Lock settings schema and TOML parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LockFileError, Result};
use crate::lockfile::format::LOCK_FILE_VERSION;
use crate::types::StringComparison;

/// How package ids are compared when classifying direct dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdComparison {
    /// Follow the host file system (case-insensitive on Windows and macOS).
    #[default]
    Os,
    /// Always exact.
    Ordinal,
    /// Always case-insensitive.
    IgnoreCase,
}

impl IdComparison {
    pub fn resolve(self) -> StringComparison {
        match self {
            IdComparison::Os => StringComparison::for_current_os(),
            IdComparison::Ordinal => StringComparison::Ordinal,
            IdComparison::IgnoreCase => StringComparison::OrdinalIgnoreCase,
        }
    }
}

/// Builder configuration, typically read from `nulock.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LockSettings {
    /// Schema version written into every lock file.
    pub lock_file_version: u32,

    pub id_comparison: IdComparison,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            lock_file_version: LOCK_FILE_VERSION,
            id_comparison: IdComparison::default(),
        }
    }
}

impl LockSettings {
    /// Parse settings from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: LockSettings =
            toml::from_str(content).map_err(|e| LockFileError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No lock settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: LockSettings = toml::from_str(&content)
            .map_err(|e| LockFileError::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lock_file_version == 0 {
            return Err(LockFileError::Config(
                "lock-file-version must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
