//! Filesystem utility functions
//!
//! This module provides the environment primitives the core relies on: a
//! metadata-preserving file copy and the "reveal in file browser" action.

use anyhow::{Context, Result, bail};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::Path;
use std::process::Command;

/// Copy a file's bytes and keep its timestamps
///
/// `fs::copy` already carries permission bits over; this additionally stamps the
/// destination with the source's access and modification times, so a backup
/// shows when the config was last edited rather than when it was backed up.
///
/// The copied permissions may make the destination read-only, so the times are
/// applied through a handle that never asks for write access to the contents.
///
/// # Arguments
/// * `src` - File to copy
/// * `dst` - Destination path, overwritten if it exists
///
/// # Returns
/// Number of bytes copied
pub fn copy_preserving_times(src: &Path, dst: &Path) -> io::Result<u64> {
    let bytes = fs::copy(src, dst)?;

    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_set_times(dst)?.set_times(times)?;

    Ok(bytes)
}

#[cfg(windows)]
fn open_for_set_times(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    // FILE_WRITE_ATTRIBUTES
    File::options().access_mode(0x100).open(path)
}

#[cfg(not(windows))]
fn open_for_set_times(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Open a directory in the platform's file browser
///
/// Fire-and-forget: the browser process is spawned and not waited on.
pub fn reveal_in_file_browser(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("Directory does not exist: {}", dir.display());
    }

    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(windows) {
        "explorer"
    } else {
        "xdg-open"
    };

    Command::new(program)
        .arg(dir)
        .spawn()
        .with_context(|| format!("Failed to run '{}' for {}", program, dir.display()))?;

    Ok(())
}
