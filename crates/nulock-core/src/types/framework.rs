//! Target framework monikers.
//!
//! Parses both short folder names (`net6.0`, `netstandard2.0`, `net472`,
//! `net8.0-windows10.0.19041`) and full names (`.NETCoreApp,Version=v6.0`).
//! Equality is framework equivalence, not textual identity: `net6.0`,
//! `NET6.0` and `.NETCoreApp,Version=v6.0` are the same framework.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{LockFileError, Result};

pub const NET_CORE_APP: &str = ".NETCoreApp";
pub const NET_FRAMEWORK: &str = ".NETFramework";
pub const NET_STANDARD: &str = ".NETStandard";
pub const NET_CORE: &str = ".NETCore";
pub const NET_MICRO: &str = ".NETMicroFramework";
pub const NET_NANO: &str = ".NETnanoFramework";
pub const NET_PORTABLE: &str = ".NETPortable";

/// Up to four numeric components; missing components are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkVersion([u64; 4]);

impl FrameworkVersion {
    pub fn new(major: u64, minor: u64) -> Self {
        Self([major, minor, 0, 0])
    }

    pub fn major(&self) -> u64 {
        self.0[0]
    }

    pub fn minor(&self) -> u64 {
        self.0[1]
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }

    /// `6.0`, `10.0.19041`: dotted, trailing zeros trimmed down to `min_parts`.
    fn dotted(&self, min_parts: usize) -> String {
        self.significant(min_parts)
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `472`, `48`, `40`: one digit per component when every component is a single digit.
    fn compact(&self) -> String {
        if self.0.iter().all(|c| *c < 10) {
            self.significant(2).iter().map(|c| c.to_string()).collect()
        } else {
            self.dotted(2)
        }
    }

    fn significant(&self, min_parts: usize) -> &[u64] {
        let mut len = 4;
        while len > min_parts && self.0[len - 1] == 0 {
            len -= 1;
        }
        &self.0[..len]
    }

    fn parse(input: &str, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(invalid(input, "framework has no version"));
        }
        if text.contains('.') {
            Self::parse_dotted(input, text)
        } else {
            Self::parse_compact(input, text)
        }
    }

    fn parse_dotted(input: &str, text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() > 4 {
            return Err(invalid(input, "version has more than four components"));
        }
        let mut components = [0u64; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid(input, &format!("'{}' is not a version number", text)));
            }
            *slot = part
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid(input, &e.to_string()))?;
        }
        Ok(Self(components))
    }

    fn parse_compact(input: &str, text: &str) -> Result<Self> {
        if text.len() > 4 || !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(input, &format!("'{}' is not a version number", text)));
        }
        let mut components = [0u64; 4];
        for (slot, digit) in components.iter_mut().zip(text.chars()) {
            *slot = u64::from(digit.to_digit(10).unwrap_or(0));
        }
        Ok(Self(components))
    }
}

/// A target framework such as `net6.0` or `.NETFramework,Version=v4.7.2`.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "String")]
pub struct Framework {
    identifier: String,
    version: FrameworkVersion,
    profile: Option<String>,
    platform: Option<String>,
    platform_version: FrameworkVersion,
}

impl Framework {
    pub fn new(identifier: impl Into<String>, version: FrameworkVersion) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            profile: None,
            platform: None,
            platform_version: FrameworkVersion::default(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>, version: FrameworkVersion) -> Self {
        self.platform = Some(platform.into());
        self.platform_version = version;
        self
    }

    /// Parse a short folder name or a full framework name.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(invalid(input, "framework is empty"));
        }
        if text.contains(',') {
            Self::parse_full_name(input, text)
        } else {
            Self::parse_short_folder_name(input, text)
        }
    }

    fn parse_full_name(input: &str, text: &str) -> Result<Self> {
        let mut parts = text.split(',').map(str::trim);
        let identifier = parts.next().unwrap_or_default();
        if identifier.is_empty() {
            return Err(invalid(input, "framework identifier is empty"));
        }

        let mut version = None;
        let mut profile = None;
        for part in parts {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| invalid(input, &format!("expected key=value, found '{}'", part)))?;
            match key.trim().to_ascii_lowercase().as_str() {
                "version" => {
                    let value = value.trim();
                    let value = value
                        .strip_prefix('v')
                        .or_else(|| value.strip_prefix('V'))
                        .unwrap_or(value);
                    version = Some(FrameworkVersion::parse_dotted(input, value)?);
                }
                "profile" => {
                    let value = value.trim();
                    if !value.is_empty() {
                        profile = Some(value.to_string());
                    }
                }
                other => {
                    return Err(invalid(input, &format!("unknown framework property '{}'", other)));
                }
            }
        }

        let version = version.ok_or_else(|| invalid(input, "missing Version"))?;
        let mut framework = Self::new(canonical_identifier(identifier), version);
        framework.profile = profile;
        Ok(framework)
    }

    fn parse_short_folder_name(input: &str, text: &str) -> Result<Self> {
        let lower = text.to_ascii_lowercase();
        let (core, suffix) = match lower.split_once('-') {
            Some((core, suffix)) => (core, Some(suffix)),
            None => (lower.as_str(), None),
        };

        let mut framework = if let Some(rest) = core.strip_prefix("netstandard") {
            Self::new(NET_STANDARD, FrameworkVersion::parse(input, rest)?)
        } else if let Some(rest) = core.strip_prefix("netcoreapp") {
            Self::new(NET_CORE_APP, FrameworkVersion::parse(input, rest)?)
        } else if let Some(rest) = core.strip_prefix("netcore") {
            Self::new(NET_CORE, FrameworkVersion::parse(input, rest)?)
        } else if let Some(rest) = core.strip_prefix("netmf") {
            Self::new(NET_MICRO, FrameworkVersion::parse(input, rest)?)
        } else if let Some(rest) = core.strip_prefix("netnano") {
            Self::new(NET_NANO, FrameworkVersion::parse(input, rest)?)
        } else if let Some(rest) = core.strip_prefix("portable") {
            // Portable profiles usually carry no version.
            let version = if rest.is_empty() {
                FrameworkVersion::default()
            } else {
                FrameworkVersion::parse(input, rest)?
            };
            Self::new(NET_PORTABLE, version)
        } else if let Some(rest) = core.strip_prefix("net") {
            let version = FrameworkVersion::parse(input, rest)?;
            if rest.contains('.') && version.major() >= 5 {
                Self::new(NET_CORE_APP, version)
            } else {
                Self::new(NET_FRAMEWORK, version)
            }
        } else {
            let split = core
                .find(|c: char| !c.is_ascii_alphabetic())
                .ok_or_else(|| invalid(input, "framework has no version"))?;
            let (identifier, rest) = core.split_at(split);
            if identifier.is_empty() {
                return Err(invalid(input, "framework identifier is empty"));
            }
            Self::new(identifier, FrameworkVersion::parse(input, rest)?)
        };

        if let Some(suffix) = suffix {
            if suffix.is_empty() {
                return Err(invalid(input, "empty framework suffix"));
            }
            if framework.is_net5_era() {
                let split = suffix
                    .find(|c: char| !c.is_ascii_alphabetic())
                    .unwrap_or(suffix.len());
                let (platform, rest) = suffix.split_at(split);
                if platform.is_empty() {
                    return Err(invalid(input, "platform name is empty"));
                }
                let platform_version = if rest.is_empty() {
                    FrameworkVersion::default()
                } else {
                    FrameworkVersion::parse_dotted(input, rest)?
                };
                framework = framework.with_platform(platform, platform_version);
            } else {
                framework = framework.with_profile(suffix);
            }
        }

        Ok(framework)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn version(&self) -> FrameworkVersion {
        self.version
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn platform_version(&self) -> FrameworkVersion {
        self.platform_version
    }

    fn is_net5_era(&self) -> bool {
        self.identifier.eq_ignore_ascii_case(NET_CORE_APP) && self.version.major() >= 5
    }

    /// Canonical short form, e.g. `net6.0`, `netstandard2.0`, `net472`.
    pub fn short_folder_name(&self) -> String {
        let mut name = if self.identifier.eq_ignore_ascii_case(NET_CORE_APP) {
            if self.is_net5_era() {
                format!("net{}", self.version.dotted(2))
            } else {
                format!("netcoreapp{}", self.version.dotted(2))
            }
        } else if self.identifier.eq_ignore_ascii_case(NET_STANDARD) {
            format!("netstandard{}", self.version.dotted(2))
        } else if self.identifier.eq_ignore_ascii_case(NET_FRAMEWORK) {
            format!("net{}", self.version.compact())
        } else if self.identifier.eq_ignore_ascii_case(NET_CORE) {
            format!("netcore{}", self.version.compact())
        } else if self.identifier.eq_ignore_ascii_case(NET_MICRO) {
            format!("netmf{}", self.version.compact())
        } else if self.identifier.eq_ignore_ascii_case(NET_NANO) {
            format!("netnano{}", self.version.dotted(2))
        } else if self.identifier.eq_ignore_ascii_case(NET_PORTABLE) {
            if self.version.is_zero() {
                "portable".to_string()
            } else {
                format!("portable{}", self.version.compact())
            }
        } else {
            format!(
                "{}{}",
                self.identifier.trim_start_matches('.').to_ascii_lowercase(),
                self.version.compact()
            )
        };

        if let Some(platform) = &self.platform {
            name.push('-');
            name.push_str(&platform.to_ascii_lowercase());
            if !self.platform_version.is_zero() {
                name.push_str(&self.platform_version.dotted(2));
            }
        } else if let Some(profile) = &self.profile {
            name.push('-');
            name.push_str(&profile.to_ascii_lowercase());
        }
        name
    }

    /// Full form, e.g. `.NETCoreApp,Version=v6.0`.
    pub fn dotnet_framework_name(&self) -> String {
        let mut name = format!("{},Version=v{}", self.identifier, self.version.dotted(2));
        if let Some(profile) = &self.profile {
            name.push_str(",Profile=");
            name.push_str(profile);
        }
        name
    }

    // Upper-cased so ordering matches case-insensitive ordinal comparison,
    // which places `_` and `[` after letters.
    fn key(&self) -> (String, FrameworkVersion, Option<String>, Option<String>, FrameworkVersion) {
        (
            self.identifier.to_ascii_uppercase(),
            self.version,
            self.profile.as_ref().map(|p| p.to_ascii_uppercase()),
            self.platform.as_ref().map(|p| p.to_ascii_uppercase()),
            self.platform_version,
        )
    }
}

fn canonical_identifier(identifier: &str) -> &str {
    [
        NET_CORE_APP,
        NET_FRAMEWORK,
        NET_STANDARD,
        NET_CORE,
        NET_MICRO,
        NET_NANO,
        NET_PORTABLE,
    ]
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(identifier))
        .unwrap_or(identifier)
}

fn invalid(input: &str, reason: &str) -> LockFileError {
    LockFileError::InvalidFramework {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl PartialEq for Framework {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Framework {}

impl Hash for Framework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Framework {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Framework {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_folder_name())
    }
}

impl FromStr for Framework {
    type Err = LockFileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Framework {
    type Error = LockFileError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}
