//! Preview formatting for profile files.
//!
//! JSON content is re-indented with two spaces, keeping keys in the order they
//! appear in the file and numbers exactly as written; anything that does not
//! parse is shown verbatim.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::SwitchError;

/// Format raw file content for display
pub fn format(raw: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}

/// Read a profile file and format it
///
/// Invalid UTF-8 is replaced rather than rejected; such content never parses as
/// JSON and is shown as-is.
pub fn format_file(path: &Path) -> Result<String, SwitchError> {
    let bytes = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SwitchError::CandidateMissing {
                path: path.to_path_buf(),
            }
        } else {
            SwitchError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Ok(format(&String::from_utf8_lossy(&bytes)))
}
