//! Test utilities shared across test modules
//!
//! This module provides common helper functions for testing, avoiding duplication
//! across multiple test suites.

use crate::paths::Paths;
use std::fs;
use tempfile::TempDir;

/// Create a Paths struct for testing using a temporary directory
///
/// The config directory itself is created, mimicking an existing ~/.claude/.
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    let paths = Paths::at(temp_dir.path().join(".claude"));
    fs::create_dir_all(&paths.config_dir).unwrap();
    paths
}

/// Write a file under the test config directory
pub fn write_profile(paths: &Paths, name: &str, content: &str) {
    fs::write(paths.profile_file(name), content).unwrap();
}

/// Number of entries currently in the backups directory
pub fn backup_count(paths: &Paths) -> usize {
    fs::read_dir(&paths.backups_dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}
