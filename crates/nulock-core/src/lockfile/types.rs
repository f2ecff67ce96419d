//! Lock file model.
//!
//! Pins the resolved package set per target. Equality is structural and
//! order-sensitive: two targets listing the same dependencies in a different
//! order are different, which is what lets callers detect a stale lock file
//! with a plain comparison.

use std::fmt;
use std::str::FromStr;

use crate::error::{LockFileError, Result};
use crate::types::{Framework, PackageVersion, StringComparison};

/// Whether a package was requested by the project or pulled in by another package.
///
/// Ordered `Direct < Transitive`, the order dependencies are grouped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstallationType {
    Direct,
    Transitive,
}

impl InstallationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallationType::Direct => "Direct",
            InstallationType::Transitive => "Transitive",
        }
    }
}

impl fmt::Display for InstallationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locked package within one target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockFileDependency {
    id: String,
    resolved_version: Option<PackageVersion>,
    content_hash: Option<String>,
    installation_type: InstallationType,
}

impl LockFileDependency {
    pub fn new(
        id: impl Into<String>,
        resolved_version: Option<PackageVersion>,
        content_hash: Option<String>,
        installation_type: InstallationType,
    ) -> Self {
        Self {
            id: id.into(),
            resolved_version,
            content_hash,
            installation_type,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn resolved_version(&self) -> Option<&PackageVersion> {
        self.resolved_version.as_ref()
    }

    /// Base64 SHA-512 of the package contents.
    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }

    pub fn installation_type(&self) -> InstallationType {
        self.installation_type
    }

    pub fn is_direct(&self) -> bool {
        self.installation_type == InstallationType::Direct
    }

    /// Equality with an explicit id comparison; `==` compares ids exactly.
    pub fn eq_with(&self, other: &Self, ids: StringComparison) -> bool {
        ids.equals(&self.id, &other.id)
            && self.resolved_version == other.resolved_version
            && self.content_hash == other.content_hash
            && self.installation_type == other.installation_type
    }
}

/// Locked dependencies for one framework / runtime identifier combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockFileTarget {
    framework: Framework,
    /// None for RID-less graphs.
    runtime_identifier: Option<String>,
    dependencies: Vec<LockFileDependency>,
}

impl LockFileTarget {
    pub fn new(framework: Framework, runtime_identifier: Option<String>) -> Self {
        Self {
            framework,
            runtime_identifier,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<LockFileDependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn framework(&self) -> &Framework {
        &self.framework
    }

    pub fn runtime_identifier(&self) -> Option<&str> {
        self.runtime_identifier.as_deref()
    }

    pub fn dependencies(&self) -> &[LockFileDependency] {
        &self.dependencies
    }

    pub fn dependency(&self, id: &str) -> Option<&LockFileDependency> {
        self.dependencies.iter().find(|d| d.id == id)
    }

    /// `{framework}/{runtime}` or just `{framework}` for RID-less targets.
    pub fn name(&self) -> String {
        match self.runtime_identifier.as_deref() {
            Some(rid) if !rid.is_empty() => format!("{}/{}", self.framework, rid),
            _ => self.framework.to_string(),
        }
    }

    /// Parse a target name in the form `{framework}` or `{framework}/{runtime}`.
    ///
    /// The parsed target has no dependencies.
    pub fn parse(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split('/').collect();
        match parts.as_slice() {
            [framework] => Ok(Self::new(Framework::parse(framework)?, None)),
            [framework, rid] if !rid.is_empty() => Ok(Self::new(
                Framework::parse(framework)?,
                Some((*rid).to_string()),
            )),
            _ => Err(LockFileError::MalformedTargetName(name.to_string())),
        }
    }

    /// Equality with an explicit dependency id comparison, still element-wise in order.
    pub fn eq_with(&self, other: &Self, ids: StringComparison) -> bool {
        self.runtime_identifier == other.runtime_identifier
            && self.framework == other.framework
            && self.dependencies.len() == other.dependencies.len()
            && self
                .dependencies
                .iter()
                .zip(&other.dependencies)
                .all(|(a, b)| a.eq_with(b, ids))
    }
}

impl fmt::Display for LockFileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for LockFileTarget {
    type Err = LockFileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A complete lock file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockFile {
    /// Schema version of the document, not a package version.
    version: u32,
    targets: Vec<LockFileTarget>,
}

impl LockFile {
    pub fn new(version: u32) -> Self {
        Self {
            version,
            targets: Vec::new(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<LockFileTarget>) -> Self {
        self.targets = targets;
        self
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn targets(&self) -> &[LockFileTarget] {
        &self.targets
    }

    /// Find a target by its `{framework}[/{runtime}]` name.
    pub fn target(&self, name: &str) -> Option<&LockFileTarget> {
        self.targets.iter().find(|t| t.name() == name)
    }

    pub fn eq_with(&self, other: &Self, ids: StringComparison) -> bool {
        self.version == other.version
            && self.targets.len() == other.targets.len()
            && self
                .targets
                .iter()
                .zip(&other.targets)
                .all(|(a, b)| a.eq_with(b, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn dep(id: &str, version: &str, hash: &str, kind: InstallationType) -> LockFileDependency {
        LockFileDependency::new(
            id,
            Some(PackageVersion::parse(version).unwrap()),
            Some(hash.to_string()),
            kind,
        )
    }

    fn net6() -> Framework {
        Framework::parse("net6.0").unwrap()
    }

    #[test]
    fn test_installation_type_order_and_names() {
        assert!(InstallationType::Direct < InstallationType::Transitive);
        assert_eq!(InstallationType::Direct.to_string(), "Direct");
        assert_eq!(InstallationType::Transitive.as_str(), "Transitive");
    }

    #[test]
    fn test_dependency_equality_requires_all_fields() {
        let base = dep("Pkg.A", "1.2.3", "abc", InstallationType::Direct);
        assert_eq!(base, dep("Pkg.A", "1.2.3", "abc", InstallationType::Direct));
        assert_ne!(base, dep("Pkg.B", "1.2.3", "abc", InstallationType::Direct));
        assert_ne!(base, dep("Pkg.A", "1.2.4", "abc", InstallationType::Direct));
        assert_ne!(base, dep("Pkg.A", "1.2.3", "abd", InstallationType::Direct));
        assert_ne!(base, dep("Pkg.A", "1.2.3", "abc", InstallationType::Transitive));

        let no_version = LockFileDependency::new("Pkg.A", None, None, InstallationType::Direct);
        assert_eq!(no_version, no_version.clone());
        assert_ne!(no_version, base);
    }

    #[test]
    fn test_dependency_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(dep("Pkg.A", "1.2.3", "abc", InstallationType::Direct));
        assert!(set.contains(&dep("Pkg.A", "1.2.3", "abc", InstallationType::Direct)));
        assert!(!set.contains(&dep("Pkg.A", "1.2.3", "abc", InstallationType::Transitive)));
    }

    #[test]
    fn test_dependency_eq_with_comparison() {
        let a = dep("Pkg.A", "1.2.3", "abc", InstallationType::Direct);
        let b = dep("pkg.a", "1.2.3", "abc", InstallationType::Direct);
        assert!(!a.eq_with(&b, StringComparison::Ordinal));
        assert!(a.eq_with(&b, StringComparison::OrdinalIgnoreCase));
    }

    #[test]
    fn test_target_name() {
        let target = LockFileTarget::new(net6(), Some("win-x64".to_string()));
        assert_eq!(target.name(), "net6.0/win-x64");
        assert_eq!(target.to_string(), "net6.0/win-x64");

        assert_eq!(LockFileTarget::new(net6(), None).name(), "net6.0");
        assert_eq!(LockFileTarget::new(net6(), Some(String::new())).name(), "net6.0");
    }

    #[test]
    fn test_target_parse() {
        let target: LockFileTarget = "net6.0/win-x64".parse().unwrap();
        assert_eq!(target.framework(), &net6());
        assert_eq!(target.runtime_identifier(), Some("win-x64"));
        assert!(target.dependencies().is_empty());

        let ridless = LockFileTarget::parse("net6.0").unwrap();
        assert_eq!(ridless.runtime_identifier(), None);
        assert_eq!(ridless, LockFileTarget::new(net6(), None));
    }

    #[test]
    fn test_target_parse_rejects_malformed_names() {
        assert!(matches!(
            LockFileTarget::parse("net6.0/win-x64/extra"),
            Err(LockFileError::MalformedTargetName(_))
        ));
        assert!(matches!(
            LockFileTarget::parse("net6.0/"),
            Err(LockFileError::MalformedTargetName(_))
        ));
        assert!(matches!(
            LockFileTarget::parse("/win-x64"),
            Err(LockFileError::InvalidFramework { .. })
        ));
    }

    #[test]
    fn test_target_equality_is_order_sensitive() {
        let a = dep("A", "1.0.0", "ha", InstallationType::Direct);
        let b = dep("B", "1.0.0", "hb", InstallationType::Transitive);

        let first = LockFileTarget::new(net6(), None).with_dependencies(vec![a.clone(), b.clone()]);
        let same = LockFileTarget::new(net6(), None).with_dependencies(vec![a.clone(), b.clone()]);
        let swapped = LockFileTarget::new(net6(), None).with_dependencies(vec![b, a]);

        assert_eq!(first, same);
        assert_ne!(first, swapped);
    }

    #[test]
    fn test_target_equality_uses_framework_equivalence() {
        let short = LockFileTarget::new(net6(), Some("linux-x64".to_string()));
        let full = LockFileTarget::new(
            Framework::parse(".NETCoreApp,Version=v6.0").unwrap(),
            Some("linux-x64".to_string()),
        );
        assert_eq!(short, full);

        let other_rid = LockFileTarget::new(net6(), Some("Linux-x64".to_string()));
        assert_ne!(short, other_rid);
    }

    #[test]
    fn test_lock_file_lookup_and_equality() {
        let lock_file = LockFile::new(1).with_targets(vec![
            LockFileTarget::new(net6(), None),
            LockFileTarget::new(net6(), Some("win-x64".to_string())),
        ]);

        assert_eq!(lock_file.version(), 1);
        assert!(lock_file.target("net6.0/win-x64").is_some());
        assert!(lock_file.target("net7.0").is_none());
        assert_ne!(lock_file, LockFile::new(2).with_targets(lock_file.targets().to_vec()));
        assert!(lock_file.eq_with(&lock_file.clone(), StringComparison::OrdinalIgnoreCase));
    }
}
