//! Diagnostic tool for ccswitch.
//!
//! This module implements the `ccswitch doctor` command, which checks the system
//! for common issues:
//! - Existence of the config directory.
//! - Validity of the active settings.json.
//! - Profiles that will never be marked synced because they are not valid JSON.
//! - Readability of the selection state and backups.
//!
//! It reports issues to the user with a pass/fail/warn status.

use crate::backups::list_backups;
use crate::paths::Paths;
use crate::profiles::{enumerate, find, validate_json_file};
use crate::state::State;
use crate::ui::Ui;

/// Run the doctor diagnostics, returning whether every check passed
pub fn run_doctor(paths: &Paths, ui: &Ui) -> bool {
    ui.section("ccswitch Doctor");
    ui.newline();

    let mut all_ok = true;

    // 1. Check directory
    all_ok &= check_step(ui, "Config Directory", || {
        if paths.config_dir.is_dir() {
            ui.println(format!(
                "  {} Config directory exists: {}",
                ui.icon_ok(),
                paths.config_dir.display()
            ));
            true
        } else {
            ui.println(format!(
                "  {} Config directory missing: {}",
                ui.icon_err(),
                paths.config_dir.display()
            ));
            false
        }
    });

    // 2. Check active file
    all_ok &= check_step(ui, "Active Settings", || {
        if !paths.active_file.exists() {
            // Not fatal: the first switch creates it
            ui.println(format!("  {} settings.json is missing", ui.icon_warn()));
            return true;
        }
        match validate_json_file(&paths.active_file) {
            Ok(()) => {
                ui.println(format!("  {} settings.json is valid JSON", ui.icon_ok()));
                true
            }
            Err(e) => {
                ui.println(format!("  {} {:#}", ui.icon_err(), e));
                ui.println(format!(
                    "  {} No profile can show as synced until this is fixed",
                    ui.icon_info()
                ));
                false
            }
        }
    });

    // 3. Check profiles
    all_ok &= check_step(ui, "Profiles", || {
        let profiles = match enumerate(&paths.config_dir) {
            Ok(p) => p,
            Err(e) => {
                ui.println(format!("  {} Failed to list profiles: {}", ui.icon_err(), e));
                return false;
            }
        };

        if profiles.is_empty() {
            ui.println(format!("  {} No profiles found", ui.icon_warn()));
            return true;
        }

        ui.println(format!("  Found {} profiles:", profiles.len()));
        for profile in profiles.iter().filter(|p| !p.is_active()) {
            match validate_json_file(&profile.path) {
                Ok(()) => ui.println(format!(
                    "    {} {} ({})",
                    ui.icon_ok(),
                    profile.name,
                    profile.status.label()
                )),
                // A broken profile only matters once someone switches to it
                Err(_) => ui.println(format!(
                    "    {} {} (not valid JSON)",
                    ui.icon_warn(),
                    profile.name
                )),
            }
        }
        true
    });

    // 4. Check state
    all_ok &= check_step(ui, "Selection State", || match State::read(&paths.state_file) {
        Ok(state) => {
            match &state.last_selected_file {
                Some(name) => {
                    ui.println(format!("  {} Last selected: {}", ui.icon_info(), name));
                    let exists = enumerate(&paths.config_dir)
                        .map(|profiles| find(&profiles, name).is_some())
                        .unwrap_or(false);
                    if !exists {
                        ui.println(format!(
                            "  {} Selected profile no longer exists; startup falls back to settings.json",
                            ui.icon_warn()
                        ));
                    }
                }
                None => ui.println(format!("  {} No selection saved", ui.icon_info())),
            }
            true
        }
        Err(e) => {
            // Corrupt state is ignored at startup, so this is only a warning
            ui.println(format!("  {} State file unreadable: {:#}", ui.icon_warn(), e));
            true
        }
    });

    // 5. Backups
    all_ok &= check_step(ui, "Backups", || {
        let backups = list_backups(&paths.backups_dir);
        if backups.is_empty() {
            ui.println(format!("  {} No backups yet", ui.icon_info()));
        } else {
            let total: u64 = backups.iter().map(|b| b.size).sum();
            ui.println(format!(
                "  {} {} backup(s), {} bytes total, in {}",
                ui.icon_ok(),
                backups.len(),
                total,
                paths.backups_dir.display()
            ));
        }
        true
    });

    all_ok
}

fn check_step<F>(ui: &Ui, name: &str, check_fn: F) -> bool
where
    F: FnOnce() -> bool,
{
    ui.println(ui.bold(format!("Checking {}...", name)));
    let success = check_fn();
    if !success {
        ui.println(ui.colored("  Issues detected!", ui.palette.error));
    }
    ui.newline();
    success
}
