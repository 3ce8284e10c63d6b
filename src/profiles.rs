//! Profile discovery and classification.
//!
//! A profile is any settings-like `*.json` file in the config directory. Every
//! enumeration re-reads the directory and recomputes each profile's status:
//! - `Active`: the file the CLI reads (`settings.json`)
//! - `Synced`: parses to the same JSON value as the active file
//! - `Plain`: everything else, including files that fail to read or parse
//!
//! The active file always comes first; the rest are sorted by name so the
//! listing never reorders between refreshes.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::SwitchError;
use crate::paths::ACTIVE_FILE_NAME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStatus {
    Active,
    Synced,
    Plain,
}

impl ProfileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Synced => "synced",
            Self::Plain => "-",
        }
    }
}

/// A candidate config file in the profile directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub path: PathBuf,
    pub status: ProfileStatus,
}

impl Profile {
    pub fn is_active(&self) -> bool {
        self.status == ProfileStatus::Active
    }
}

/// Whether a file name qualifies as a profile
///
/// Only settings-like names are accepted: `settings.json` itself, anything
/// containing `settings`, `settings_*` and `*_settings.json`, compared
/// case-insensitively. The `.json` extension itself must be lowercase.
pub fn is_candidate(name: &str) -> bool {
    if !name.ends_with(".json") {
        return false;
    }

    let lower = name.to_lowercase();
    lower == ACTIVE_FILE_NAME
        || lower.contains("settings")
        || lower.starts_with("settings_")
        || lower.ends_with("_settings.json")
}

/// List and classify all profiles in `dir`
pub fn enumerate(dir: &Path) -> Result<Vec<Profile>, SwitchError> {
    if !dir.is_dir() {
        return Err(SwitchError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            SwitchError::DirectoryNotFound {
                path: dir.to_path_buf(),
            }
        } else {
            SwitchError::Read {
                path: dir.to_path_buf(),
                source,
            }
        }
    })?;

    let mut active: Option<PathBuf> = None;
    let mut others: Vec<(String, PathBuf)> = Vec::new();

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let Some(name) = entry.file_name().to_str().map(String::from) else {
            continue;
        };
        if !is_candidate(&name) || !path.is_file() {
            continue;
        }

        if name == ACTIVE_FILE_NAME {
            active = Some(path);
        } else {
            others.push((name, path));
        }
    }

    others.sort_by(|a, b| a.0.cmp(&b.0));

    let active_value = active.as_deref().and_then(read_json);

    let mut profiles = Vec::with_capacity(others.len() + 1);
    if let Some(path) = active {
        profiles.push(Profile {
            name: ACTIVE_FILE_NAME.to_string(),
            path,
            status: ProfileStatus::Active,
        });
    }

    for (name, path) in others {
        let status = match &active_value {
            Some(active_value)
                if read_json(&path).is_some_and(|value| json_equal(&value, active_value)) =>
            {
                ProfileStatus::Synced
            }
            _ => ProfileStatus::Plain,
        };
        profiles.push(Profile { name, path, status });
    }

    debug!(dir = %dir.display(), count = profiles.len(), "enumerated profiles");
    Ok(profiles)
}

/// Read and parse a file as JSON, logging why it could not be
fn read_json(path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), "unreadable profile: {e}");
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), "profile is not valid JSON: {e}");
            None
        }
    }
}

/// Structural JSON equality with numbers compared by value
///
/// Object key order never matters, and `1`, `1.0` and `1e0` are the same number.
/// Integers too large for 64 bits are compared by their exact digits.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Look up a profile by file name
pub fn find<'a>(profiles: &'a [Profile], name: &str) -> Option<&'a Profile> {
    profiles.iter().find(|p| p.name == name)
}

/// Selection to use at startup
///
/// The persisted selection wins if it still exists, otherwise the active file.
pub fn initial_selection<'a>(
    profiles: &'a [Profile],
    persisted: Option<&str>,
) -> Option<&'a Profile> {
    persisted
        .and_then(|name| find(profiles, name))
        .or_else(|| profiles.iter().find(|p| p.is_active()))
}

/// Selection to keep after a manual refresh
///
/// Only the previous selection is kept, and only if it still exists.
pub fn refreshed_selection<'a>(
    profiles: &'a [Profile],
    previous: Option<&str>,
) -> Option<&'a Profile> {
    previous.and_then(|name| find(profiles, name))
}

/// Validate that a file contains valid JSON
pub fn validate_json_file(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    serde_json::from_str::<Value>(&content)
        .with_context(|| format!("Invalid JSON in file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{setup_test_paths, write_profile};
    use tempfile::TempDir;

    fn names(profiles: &[Profile]) -> Vec<&str> {
        profiles.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_candidate_filter() {
        assert!(is_candidate("settings.json"));
        assert!(is_candidate("a_settings.json"));
        assert!(is_candidate("settings_work.json"));
        assert!(is_candidate("mysettings.json"));
        assert!(is_candidate("Work_Settings.json"));
        assert!(is_candidate("SETTINGS.json"));

        assert!(!is_candidate("b.json"));
        assert!(!is_candidate("settings.json.bak"));
        assert!(!is_candidate("settings.txt"));
        assert!(!is_candidate("settings.JSON"));
        assert!(!is_candidate(".cc-cache"));
    }

    #[test]
    fn test_enumerate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = enumerate(&temp_dir.path().join("nope"));
        assert!(matches!(result, Err(SwitchError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_enumerate_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        assert!(enumerate(&paths.config_dir).unwrap().is_empty());
    }

    #[test]
    fn test_enumerate_filters_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", "{}");
        write_profile(&paths, "a_settings.json", "{}");
        write_profile(&paths, "b.json", "{}");
        fs::create_dir(paths.profile_file("dir_settings.json")).unwrap();

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(names(&profiles), vec!["settings.json", "a_settings.json"]);
    }

    #[test]
    fn test_enumerate_order() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        for name in [
            "z_settings.json",
            "B_settings.json",
            "settings.json",
            "a_settings.json",
            "settings_2.json",
        ] {
            write_profile(&paths, name, "{}");
        }

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(
            names(&profiles),
            vec![
                "settings.json",
                "B_settings.json",
                "a_settings.json",
                "settings_2.json",
                "z_settings.json",
            ]
        );
    }

    #[test]
    fn test_synced_ignores_key_order_and_whitespace() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", r#"{"a": 1, "b": {"c": [1, 2]}}"#);
        write_profile(
            &paths,
            "same_settings.json",
            "{\n  \"b\": {\"c\": [1,2]},\n  \"a\": 1\n}",
        );
        write_profile(&paths, "diff_settings.json", r#"{"a": 1, "b": {"c": [2, 1]}}"#);
        write_profile(&paths, "extra_settings.json", r#"{"a": 1, "b": {"c": [1, 2]}, "d": 0}"#);

        let profiles = enumerate(&paths.config_dir).unwrap();
        let status = |name| find(&profiles, name).unwrap().status;
        assert_eq!(status("settings.json"), ProfileStatus::Active);
        assert_eq!(status("same_settings.json"), ProfileStatus::Synced);
        assert_eq!(status("diff_settings.json"), ProfileStatus::Plain);
        assert_eq!(status("extra_settings.json"), ProfileStatus::Plain);
    }

    #[test]
    fn test_synced_compares_numbers_by_value() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", r#"{"timeout": 1, "ratio": 0.5}"#);
        write_profile(&paths, "f_settings.json", r#"{"timeout": 1.0, "ratio": 5e-1}"#);
        write_profile(&paths, "g_settings.json", r#"{"timeout": 2, "ratio": 0.5}"#);
        write_profile(&paths, "s_settings.json", r#"{"timeout": "1", "ratio": 0.5}"#);

        let profiles = enumerate(&paths.config_dir).unwrap();
        let status = |name| find(&profiles, name).unwrap().status;
        assert_eq!(status("f_settings.json"), ProfileStatus::Synced);
        assert_eq!(status("g_settings.json"), ProfileStatus::Plain);
        assert_eq!(status("s_settings.json"), ProfileStatus::Plain);
    }

    #[test]
    fn test_json_equal_large_integers() {
        let parse = |s: &str| serde_json::from_str::<Value>(s).unwrap();
        assert!(json_equal(
            &parse("[12345678901234567890123]"),
            &parse("[12345678901234567890123]")
        ));
        assert!(!json_equal(
            &parse("[12345678901234567890123]"),
            &parse("[12345678901234567890124]")
        ));
        assert!(json_equal(&parse("[-0, 100]"), &parse("[0, 1e2]")));
        assert!(!json_equal(&parse("[true]"), &parse("[1]")));
    }

    #[test]
    fn test_invalid_active_disables_synced() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", "{ broken");
        write_profile(&paths, "x_settings.json", "{ broken");

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(profiles[0].status, ProfileStatus::Active);
        assert_eq!(profiles[1].status, ProfileStatus::Plain);
    }

    #[test]
    fn test_unparseable_candidate_is_plain() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", r#"{"a": 1}"#);
        write_profile(&paths, "bad_settings.json", "not json");
        fs::write(paths.profile_file("bin_settings.json"), [0xff, 0xfe, 0x00]).unwrap();
        write_profile(&paths, "good_settings.json", r#"{"a": 1}"#);

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(profiles.len(), 4);
        assert_eq!(find(&profiles, "bad_settings.json").unwrap().status, ProfileStatus::Plain);
        assert_eq!(find(&profiles, "bin_settings.json").unwrap().status, ProfileStatus::Plain);
        assert_eq!(find(&profiles, "good_settings.json").unwrap().status, ProfileStatus::Synced);
    }

    #[test]
    fn test_no_active_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "dev_settings.json", r#"{"a": 1}"#);

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "dev_settings.json");
        assert_eq!(profiles[0].status, ProfileStatus::Plain);
    }

    #[test]
    fn test_uppercase_settings_is_not_active() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "Settings.json", "{}");

        let profiles = enumerate(&paths.config_dir).unwrap();
        assert_eq!(names(&profiles), vec!["Settings.json"]);
        assert!(!profiles[0].is_active());
    }

    #[test]
    fn test_validate_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "ok_settings.json", r#"{"a": [1]}"#);
        write_profile(&paths, "bad_settings.json", "{");

        assert!(validate_json_file(&paths.profile_file("ok_settings.json")).is_ok());
        assert!(validate_json_file(&paths.profile_file("bad_settings.json")).is_err());
        assert!(validate_json_file(&paths.profile_file("none_settings.json")).is_err());
    }

    #[test]
    fn test_initial_selection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", "{}");
        write_profile(&paths, "work_settings.json", "{}");
        let profiles = enumerate(&paths.config_dir).unwrap();

        let pick = |persisted| initial_selection(&profiles, persisted).map(|p| p.name.as_str());
        assert_eq!(pick(Some("work_settings.json")), Some("work_settings.json"));
        assert_eq!(pick(Some("gone_settings.json")), Some("settings.json"));
        assert_eq!(pick(None), Some("settings.json"));
    }

    #[test]
    fn test_initial_selection_without_active() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "dev_settings.json", "{}");
        let profiles = enumerate(&paths.config_dir).unwrap();

        assert!(initial_selection(&profiles, None).is_none());
        assert!(initial_selection(&profiles, Some("settings.json")).is_none());
    }

    #[test]
    fn test_refreshed_selection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = setup_test_paths(&temp_dir);
        write_profile(&paths, "settings.json", "{}");
        write_profile(&paths, "work_settings.json", "{}");
        let profiles = enumerate(&paths.config_dir).unwrap();

        assert_eq!(
            refreshed_selection(&profiles, Some("work_settings.json")).map(|p| p.name.as_str()),
            Some("work_settings.json")
        );
        // Vanished selection does not fall back to the active file
        assert!(refreshed_selection(&profiles, Some("gone_settings.json")).is_none());
        assert!(refreshed_selection(&profiles, None).is_none());
    }
}
