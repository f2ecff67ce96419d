//! Package id comparison strategies.

use serde::{Deserialize, Serialize};

/// How package ids are compared when classifying or comparing dependencies.
///
/// Package ids follow the case sensitivity of the file system they are
/// restored onto; callers pick the strategy explicitly or use
/// [`StringComparison::for_current_os`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringComparison {
    /// Exact byte comparison.
    Ordinal,
    /// ASCII case-insensitive comparison.
    OrdinalIgnoreCase,
}

impl StringComparison {
    /// Case-insensitive on Windows and macOS, exact everywhere else.
    pub fn for_current_os() -> Self {
        if cfg!(any(windows, target_os = "macos")) {
            StringComparison::OrdinalIgnoreCase
        } else {
            StringComparison::Ordinal
        }
    }

    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            StringComparison::Ordinal => a == b,
            StringComparison::OrdinalIgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }
}

impl Default for StringComparison {
    fn default() -> Self {
        Self::for_current_os()
    }
}
