use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::SwitchError;

/// State stored in ~/.claude/.cc-cache
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct State {
    /// Name of the profile file the user last selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_selected_file: Option<String>,
}

impl State {
    /// Read state from file, returning default if file doesn't exist
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file: {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {:?}", path))
    }

    /// Write state to file atomically
    ///
    /// Uses atomic write pattern: write to temp file, then rename.
    pub fn write(&self, path: &Path) -> Result<(), SwitchError> {
        let persistence_failed = |source: io::Error| SwitchError::PersistenceFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(persistence_failed)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| persistence_failed(io::Error::other(e)))?;

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = std::path::PathBuf::from(temp_name);

        std::fs::write(&temp_path, &content).map_err(persistence_failed)?;
        std::fs::rename(&temp_path, path).map_err(persistence_failed)
    }
}

/// Load the last selected profile name
///
/// Missing, unreadable or corrupt state all mean "no prior selection".
pub fn load_selection_state(path: &Path) -> Option<String> {
    match State::read(path) {
        Ok(state) => state.last_selected_file.filter(|name| !name.is_empty()),
        Err(e) => {
            debug!("ignoring unusable selection state: {e:#}");
            None
        }
    }
}

/// Persist the given profile name as the last selection
///
/// Failures are logged and otherwise ignored.
pub fn save_selection_state(path: &Path, name: &str) {
    let state = State {
        last_selected_file: Some(name.to_string()),
    };
    if let Err(e) = state.write(path) {
        warn!("{e}");
    }
}
