//! Lock file model, construction and persistence.
//!
//! [`LockFileBuilder`] turns a resolved graph into a [`LockFile`];
//! [`LockFileFormat`] renders it to `nuget.lock.json`.

pub mod builder;
pub mod format;
pub mod paths;
pub mod types;

pub use builder::LockFileBuilder;
pub use format::{LOCK_FILE_NAME, LOCK_FILE_VERSION, LockFileFormat};
pub use paths::{is_lock_file_enabled, lock_file_path};
pub use types::{InstallationType, LockFile, LockFileDependency, LockFileTarget};
