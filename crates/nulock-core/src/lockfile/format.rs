//! On-disk lock file document.
//!
//! ```text
//! {
//!   "version": 1,
//!   "dependencies": {
//!     "net6.0": {
//!       "Newtonsoft.Json": {
//!         "type": "Direct",
//!         "version": "13.0.1",
//!         "sha512": "..."
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Targets and dependencies are written in model order; nothing is re-sorted
//! here. `version` and `sha512` are omitted when absent.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

use crate::error::Result;

use super::types::{LockFile, LockFileDependency, LockFileTarget};

/// Schema version written by default.
pub const LOCK_FILE_VERSION: u32 = 1;

/// Default lock file name inside a project directory.
pub const LOCK_FILE_NAME: &str = "nuget.lock.json";

const VERSION_PROPERTY: &str = "version";
const DEPENDENCIES_PROPERTY: &str = "dependencies";

/// Serializes lock files and writes them to disk.
pub struct LockFileFormat;

impl LockFileFormat {
    /// Render the indented document.
    pub fn serialize(lock_file: &LockFile) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Document(lock_file))?)
    }

    /// Write the document to any writer.
    pub fn write_to<W: Write>(mut writer: W, lock_file: &LockFile) -> Result<()> {
        let content = Self::serialize(lock_file)?;
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the document to `path`, replacing any existing file.
    ///
    /// Missing parent directories are created. The document is rendered
    /// before the file is opened, so a serialization failure leaves an
    /// existing file untouched.
    pub fn write(path: &Path, lock_file: &LockFile) -> Result<()> {
        let content = Self::serialize(lock_file)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        tracing::debug!(
            path = %path.display(),
            targets = lock_file.targets().len(),
            "Wrote lock file"
        );
        Ok(())
    }
}

struct Document<'a>(&'a LockFile);

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(VERSION_PROPERTY, &self.0.version())?;
        map.serialize_entry(DEPENDENCIES_PROPERTY, &Targets(self.0.targets()))?;
        map.end()
    }
}

struct Targets<'a>(&'a [LockFileTarget]);

impl Serialize for Targets<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seen = HashSet::new();
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for target in self.0 {
            let name = target.name();
            if !seen.insert(name.clone()) {
                return Err(S::Error::custom(format!("duplicate target '{}'", name)));
            }
            map.serialize_entry(&name, &Dependencies(target.dependencies()))?;
        }
        map.end()
    }
}

struct Dependencies<'a>(&'a [LockFileDependency]);

impl Serialize for Dependencies<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seen = HashSet::new();
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for dependency in self.0 {
            if !seen.insert(dependency.id()) {
                return Err(S::Error::custom(format!(
                    "duplicate dependency '{}'",
                    dependency.id()
                )));
            }
            map.serialize_entry(dependency.id(), &DependencyEntry::from(dependency))?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct DependencyEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha512: Option<&'a str>,
}

impl<'a> From<&'a LockFileDependency> for DependencyEntry<'a> {
    fn from(dependency: &'a LockFileDependency) -> Self {
        Self {
            kind: dependency.installation_type().as_str(),
            version: dependency
                .resolved_version()
                .map(|v| v.to_normalized_string()),
            sha512: dependency.content_hash(),
        }
    }
}
