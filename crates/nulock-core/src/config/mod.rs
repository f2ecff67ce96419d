//! Builder configuration
//!
//! Settings that shape every lock file a builder produces: the schema
//! version and how package ids are compared.

pub mod settings;

pub use settings::{IdComparison, LockSettings};

/// Default settings file name, looked up next to the project.
pub const SETTINGS_FILE_NAME: &str = "nulock.toml";
