//! Profile switching logic.
//!
//! This module implements the core mechanism of `ccswitch`: activating a profile.
//! Activation is a fixed sequence:
//! - Reject an empty selection, the active file itself, and missing files.
//! - Back up the current `settings.json` into `backups/` (if there is one).
//! - Copy the chosen profile over `settings.json`.
//!
//! A failed backup aborts before the active file is touched. A failed copy after
//! a successful backup leaves the backup as the only way back.

use chrono::{Local, NaiveDateTime};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::SwitchError;
use crate::fs_utils::copy_preserving_times;
use crate::paths::Paths;

pub const BACKUP_PREFIX: &str = "settings_backup_";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Outcome of a successful activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationResult {
    /// File name of the profile that is now active
    pub activated: String,
    /// Backup of the previous active file, if there was one
    pub backup: Option<PathBuf>,
}

/// Activate the profile file named `name` in the config directory
///
/// `name` must be a bare file name; anything that would resolve outside the
/// config directory (or into a subdirectory of it) is reported as missing.
pub fn switch_to_profile(paths: &Paths, name: &str) -> Result<ActivationResult, SwitchError> {
    if !name.is_empty() && Path::new(name).file_name() != Some(OsStr::new(name)) {
        return Err(SwitchError::CandidateMissing {
            path: paths.profile_file(name),
        });
    }
    let candidate = (!name.is_empty()).then(|| paths.profile_file(name));
    activate(&paths.active_file, &paths.backups_dir, candidate.as_deref())
}

/// Back up `active_file` and overwrite it with `candidate`
pub fn activate(
    active_file: &Path,
    backups_dir: &Path,
    candidate: Option<&Path>,
) -> Result<ActivationResult, SwitchError> {
    activate_at(active_file, backups_dir, candidate, Local::now().naive_local())
}

fn activate_at(
    active_file: &Path,
    backups_dir: &Path,
    candidate: Option<&Path>,
    now: NaiveDateTime,
) -> Result<ActivationResult, SwitchError> {
    let candidate = match candidate {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(SwitchError::NoSelection),
    };

    let name = candidate
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or(SwitchError::NoSelection)?;

    if candidate.file_name() == active_file.file_name() {
        return Err(SwitchError::AlreadyActive { name });
    }

    if !candidate.exists() {
        return Err(SwitchError::CandidateMissing {
            path: candidate.to_path_buf(),
        });
    }

    let backup = if active_file.exists() {
        Some(backup_active_file(active_file, backups_dir, now)?)
    } else {
        None
    };

    copy_preserving_times(candidate, active_file).map_err(|source| SwitchError::SwitchFailed {
        from: candidate.to_path_buf(),
        to: active_file.to_path_buf(),
        source,
    })?;

    info!(profile = %name, "switched active config");
    Ok(ActivationResult {
        activated: name,
        backup,
    })
}

/// Copy the active file into `backups_dir` under a timestamped name
pub fn backup_active_file(
    active_file: &Path,
    backups_dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, SwitchError> {
    let backup_failed = |to: PathBuf| {
        let from = active_file.to_path_buf();
        move |source: io::Error| SwitchError::BackupFailed { from, to, source }
    };

    fs::create_dir_all(backups_dir).map_err(backup_failed(backups_dir.to_path_buf()))?;

    let backup_path = unique_backup_path(backups_dir, now);
    copy_preserving_times(active_file, &backup_path).map_err(backup_failed(backup_path.clone()))?;

    debug!(backup = %backup_path.display(), "backed up active config");
    Ok(backup_path)
}

/// `settings_backup_<YYYYMMDD_HHMMSS>.json`, suffixed `_1`, `_2`, ... if taken
fn unique_backup_path(backups_dir: &Path, now: NaiveDateTime) -> PathBuf {
    let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let mut path = backups_dir.join(format!("{BACKUP_PREFIX}{stamp}.json"));
    let mut n = 1;
    while path.exists() {
        path = backups_dir.join(format!("{BACKUP_PREFIX}{stamp}_{n}.json"));
        n += 1;
    }
    path
}
