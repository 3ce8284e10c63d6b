//! Error kinds returned by the core operations.
//!
//! The command layer wraps these in `anyhow` for user-facing messages; the core
//! itself always hands back one of these variants so callers can branch on the
//! kind (e.g. treat `AlreadyActive` as informational).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Config directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("No profile selected")]
    NoSelection,

    #[error("'{name}' is already the active config")]
    AlreadyActive { name: String },

    #[error("Profile file not found: {}", path.display())]
    CandidateMissing { path: PathBuf },

    #[error("Failed to back up {} to {}: {source}", from.display(), to.display())]
    BackupFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {} over {}: {source}", from.display(), to.display())]
    SwitchFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Selection state could not be written. Advisory only.
    #[error("Failed to persist selection state to {}: {source}", path.display())]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SwitchError {
    /// Whether this outcome is a no-op rather than a failure the user must fix
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::AlreadyActive { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_active_is_informational() {
        let err = SwitchError::AlreadyActive {
            name: "settings.json".to_string(),
        };
        assert!(err.is_informational());
        assert!(!SwitchError::NoSelection.is_informational());
    }

    #[test]
    fn test_messages_include_paths() {
        let err = SwitchError::CandidateMissing {
            path: PathBuf::from("/tmp/work_settings.json"),
        };
        assert!(err.to_string().contains("work_settings.json"));
    }
}
