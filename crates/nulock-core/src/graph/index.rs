//! Content hash lookup keyed by package identity.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::{LockFileError, Result};
use crate::types::{PackageIdentity, PackageVersion};

use super::{LibraryEntry, LibraryKind};

/// Maps `(id, version)` to the content hash recorded for that package.
///
/// Package ids are matched case-insensitively here, the way feeds treat
/// them, even though [`PackageIdentity`] itself compares ids exactly.
#[derive(Debug, Clone, Default)]
pub struct IdentityIndex {
    hashes: HashMap<IdentityKey, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IdentityKey {
    id: String,
    version: PackageVersion,
}

impl IdentityKey {
    fn new(identity: &PackageIdentity) -> Self {
        Self {
            id: identity.id.to_ascii_uppercase(),
            version: identity.version.clone(),
        }
    }
}

impl IdentityIndex {
    /// Index the package-kind entries of a de-duplicated library list.
    ///
    /// Two package entries with the same identity mean the resolved graph is
    /// corrupt, and construction fails.
    pub fn from_libraries<'a, I>(libraries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a LibraryEntry>,
    {
        let mut hashes = HashMap::new();
        for library in libraries {
            if library.kind != LibraryKind::Package {
                continue;
            }
            let identity = library.identity();
            match hashes.entry(IdentityKey::new(&identity)) {
                Entry::Occupied(_) => {
                    return Err(LockFileError::DuplicateIdentity(identity));
                }
                Entry::Vacant(entry) => {
                    entry.insert(library.sha512.clone());
                }
            }
        }
        Ok(Self { hashes })
    }

    /// Content hash for `identity`.
    ///
    /// `Ok(None)` means the package is known but no hash was recorded. A miss
    /// is an error: the per-target library list and the de-duplicated list
    /// disagree.
    pub fn get(&self, identity: &PackageIdentity) -> Result<Option<&str>> {
        self.hashes
            .get(&IdentityKey::new(identity))
            .map(|hash| hash.as_deref())
            .ok_or_else(|| LockFileError::MissingIdentity(identity.clone()))
    }

    pub fn contains(&self, identity: &PackageIdentity) -> bool {
        self.hashes.contains_key(&IdentityKey::new(identity))
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
