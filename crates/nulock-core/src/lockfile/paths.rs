//! Lock file location helpers.

use std::path::PathBuf;

use crate::project::ProjectSpec;

use super::format::LOCK_FILE_NAME;

/// Where the project's lock file lives.
///
/// An explicit, non-empty `lockFilePath` wins and is returned unchanged.
/// Otherwise the lock file sits in the project's base directory.
pub fn lock_file_path(project: &ProjectSpec) -> PathBuf {
    match project.restore.lock_file_path.as_ref() {
        Some(path) if !path.as_os_str().is_empty() => path.clone(),
        _ => project.base_directory.join(LOCK_FILE_NAME),
    }
}

/// True if the project restores with a lock file and one already exists.
///
/// Touches the file system.
pub fn is_lock_file_enabled(project: &ProjectSpec) -> bool {
    if !project.restore.restore_with_lock_file {
        return false;
    }
    let path = lock_file_path(project);
    let exists = path.is_file();
    tracing::trace!(path = %path.display(), exists, "Checked for lock file");
    exists
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::RestoreMetadata;
    use std::path::Path;
    use tempfile::TempDir;

    fn restore(enabled: bool, path: Option<&Path>) -> RestoreMetadata {
        RestoreMetadata {
            restore_with_lock_file: enabled,
            lock_file_path: path.map(Path::to_path_buf),
        }
    }

    #[test]
    fn test_default_path() {
        let project = ProjectSpec::new("/proj");
        assert_eq!(lock_file_path(&project), PathBuf::from("/proj/nuget.lock.json"));
    }

    #[test]
    fn test_explicit_path_unchanged() {
        let project =
            ProjectSpec::new("/proj").with_restore(restore(true, Some(Path::new("locks/app.json"))));
        assert_eq!(lock_file_path(&project), PathBuf::from("locks/app.json"));
    }

    #[test]
    fn test_empty_explicit_path_falls_back() {
        let project = ProjectSpec::new("/proj").with_restore(restore(true, Some(Path::new(""))));
        assert_eq!(lock_file_path(&project), PathBuf::from("/proj/nuget.lock.json"));
    }

    #[test]
    fn test_enabled_requires_flag_and_file() {
        let tmp = TempDir::new().unwrap();
        let project = ProjectSpec::new(tmp.path()).with_restore(restore(true, None));
        assert!(!is_lock_file_enabled(&project));

        std::fs::write(tmp.path().join(LOCK_FILE_NAME), "{}").unwrap();
        assert!(is_lock_file_enabled(&project));

        let disabled = ProjectSpec::new(tmp.path()).with_restore(restore(false, None));
        assert!(!is_lock_file_enabled(&disabled));
    }

    #[test]
    fn test_enabled_checks_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let custom = tmp.path().join("custom.lock.json");
        std::fs::write(tmp.path().join(LOCK_FILE_NAME), "{}").unwrap();

        let project = ProjectSpec::new(tmp.path()).with_restore(restore(true, Some(&custom)));
        assert!(!is_lock_file_enabled(&project));

        std::fs::write(&custom, "{}").unwrap();
        assert!(is_lock_file_enabled(&project));
    }
}
