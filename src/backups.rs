//! Listing of backups taken before each switch.
//!
//! Backups are append-only; nothing here deletes them.

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

use crate::switch::{BACKUP_PREFIX, BACKUP_TIMESTAMP_FORMAT};

/// A backup file in the backups directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub name: String,
    pub path: PathBuf,
    /// Local time encoded in the file name
    pub taken_at: NaiveDateTime,
    pub size: u64,
}

/// Parse the timestamp out of `settings_backup_<YYYYMMDD_HHMMSS>[_n].json`
pub fn parse_backup_name(name: &str) -> Option<NaiveDateTime> {
    let stem = name.strip_prefix(BACKUP_PREFIX)?.strip_suffix(".json")?;
    // YYYYMMDD_HHMMSS is 15 characters; anything after is a collision suffix
    let (stamp, rest) = stem.split_at_checked(15)?;
    if !rest.is_empty() {
        let n = rest.strip_prefix('_')?;
        if n.is_empty() || !n.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()
}

/// List backups, newest first
///
/// A missing directory simply has no backups.
pub fn list_backups(backups_dir: &Path) -> Vec<BackupRecord> {
    let Ok(entries) = fs::read_dir(backups_dir) else {
        return Vec::new();
    };

    let mut backups: Vec<BackupRecord> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_str()?.to_string();
            let taken_at = parse_backup_name(&name)?;
            let metadata = e.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            Some(BackupRecord {
                name,
                path: e.path(),
                taken_at,
                size: metadata.len(),
            })
        })
        .collect();

    backups.sort_by(|a, b| b.taken_at.cmp(&a.taken_at).then_with(|| b.name.cmp(&a.name)));
    backups
}
