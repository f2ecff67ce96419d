//! Package versions as they appear in resolved graphs.
//!
//! Versions carry one to four numeric components, an optional prerelease
//! label and optional build metadata. Labels are validated with the `semver`
//! crate; the extra fourth component (revision) is tracked alongside.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease};
use serde::Deserialize;

use crate::error::{LockFileError, Result};

/// Resolved package version
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct PackageVersion {
    major: u64,
    minor: u64,
    patch: u64,
    revision: u64,
    pre: Prerelease,
    build: BuildMetadata,
    original: String,
}

impl PackageVersion {
    /// Create a release version `major.minor.patch`.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            revision: 0,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
            original: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Parse a version string such as `1.0`, `2.1.0.4` or `3.0.0-beta.1+sha.5114f85`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(invalid(input, "version is empty"));
        }

        let (rest, metadata) = match text.split_once('+') {
            Some((rest, metadata)) => (rest, Some(metadata)),
            None => (text, None),
        };
        let (numbers, label) = match rest.split_once('-') {
            Some((numbers, label)) => (numbers, Some(label)),
            None => (rest, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() > 4 {
            return Err(invalid(input, "at most four numeric components are allowed"));
        }
        let mut components = [0u64; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid(input, &format!("'{}' is not a number", part)));
            }
            *slot = part
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(input, &e.to_string()))?;
        }

        let pre = match label {
            Some("") => return Err(invalid(input, "prerelease label is empty")),
            Some(label) => Prerelease::new(label).map_err(|e| invalid(input, &e.to_string()))?,
            None => Prerelease::EMPTY,
        };
        let build = match metadata {
            Some("") => return Err(invalid(input, "build metadata is empty")),
            Some(metadata) => {
                BuildMetadata::new(metadata).map_err(|e| invalid(input, &e.to_string()))?
            }
            None => BuildMetadata::EMPTY,
        };

        Ok(Self {
            major: components[0],
            minor: components[1],
            patch: components[2],
            revision: components[3],
            pre,
            build,
            original: text.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Prerelease label without the leading `-` (empty for releases).
    pub fn prerelease(&self) -> &str {
        self.pre.as_str()
    }

    pub fn metadata(&self) -> Option<&str> {
        if self.build.is_empty() {
            None
        } else {
            Some(self.build.as_str())
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// The text this version was parsed from.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical form: `major.minor.patch[.revision][-prerelease]`.
    ///
    /// The revision is only written when non-zero and build metadata is dropped.
    pub fn to_normalized_string(&self) -> String {
        let mut out = format!("{}.{}.{}", self.major, self.minor, self.patch);
        if self.revision > 0 {
            out.push_str(&format!(".{}", self.revision));
        }
        if !self.pre.is_empty() {
            out.push('-');
            out.push_str(self.pre.as_str());
        }
        out
    }
}

fn invalid(input: &str, reason: &str) -> LockFileError {
    LockFileError::InvalidVersion {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

// Build metadata never takes part in equality; labels compare case-insensitively.
impl PartialEq for PackageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.revision == other.revision
            && self.pre.as_str().eq_ignore_ascii_case(other.pre.as_str())
    }
}

impl Eq for PackageVersion {}

impl Hash for PackageVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.revision.hash(state);
        self.pre.as_str().to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_normalized_string())
    }
}

impl FromStr for PackageVersion {
    type Err = LockFileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = LockFileError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}
