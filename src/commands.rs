//! High-level command orchestration for the CLI.
//!
//! This module contains the handler functions for each CLI command (`list`, `use`, `show`, etc.).
//! It serves as the coordination layer, interacting with:
//! - `crate::ui` for user interaction (output, prompts).
//! - `crate::paths` for filesystem locations.
//! - `crate::profiles` for discovery and status.
//! - `crate::switch` for activation.
//! - `crate::state` for the persisted selection.
//!
//! Each function here generally corresponds to a subcommand in `main.rs`.

use anyhow::{Context, Result, bail};
use inquire::Select;

use crate::backups::list_backups;
use crate::doctor::run_doctor;
use crate::error::SwitchError;
use crate::fs_utils::reveal_in_file_browser;
use crate::paths::Paths;
use crate::preview;
use crate::profiles::{
    Profile, ProfileStatus, enumerate, find, initial_selection, validate_json_file,
};
use crate::state::{load_selection_state, save_selection_state};
use crate::switch::activate;
use crate::ui::Ui;

/// Enumerate profiles, turning a missing directory into a hinted error
fn load_profiles(paths: &Paths) -> Result<Vec<Profile>> {
    enumerate(&paths.config_dir).map_err(|e| match e {
        SwitchError::DirectoryNotFound { .. } => anyhow::anyhow!(
            "{}\nHint: Pass --dir or set CCSWITCH_DIR to point at your Claude config directory.",
            e
        ),
        other => other.into(),
    })
}

/// List all profiles with their status
pub fn list(paths: &Paths, ui: &Ui) -> Result<()> {
    let profiles = load_profiles(paths)?;

    if profiles.is_empty() {
        ui.warn("No profiles found.");
        ui.newline();
        ui.println(format!(
            "Save configs as {} next to settings.json to see them here.",
            ui.bold("<name>_settings.json")
        ));
        return Ok(());
    }

    let persisted = load_selection_state(&paths.state_file);
    let selected = initial_selection(&profiles, persisted.as_deref()).map(|p| p.name.as_str());

    let mut table = ui.simple_table();
    table.set_header(vec![
        ui.header_cell(""),
        ui.header_cell("Profile"),
        ui.header_cell("Status"),
    ]);

    for profile in &profiles {
        let marker = if Some(profile.name.as_str()) == selected {
            ">"
        } else {
            " "
        };
        let status_cell = match profile.status {
            ProfileStatus::Active => ui.colored_cell("active", ui.palette.active),
            ProfileStatus::Synced => ui.colored_cell("synced", ui.palette.synced),
            ProfileStatus::Plain => ui.cell(profile.status.label()),
        };

        table.add_row(vec![ui.cell(marker), ui.cell(&profile.name), status_cell]);
    }

    ui.section("Profiles");
    ui.println(table.to_string());

    Ok(())
}

/// Print the formatted content of a profile
pub fn show(paths: &Paths, name: Option<&str>, ui: &Ui) -> Result<()> {
    let profiles = load_profiles(paths)?;

    let persisted = load_selection_state(&paths.state_file);
    let profile = match name {
        Some(name) => find(&profiles, name),
        None => initial_selection(&profiles, persisted.as_deref()),
    };

    let Some(profile) = profile else {
        match name {
            Some(name) => bail!(
                "Profile '{}' not found.\nHint: Use 'ccswitch list' to see available profiles.",
                name
            ),
            None => bail!(SwitchError::NoSelection),
        }
    };

    let content = preview::format_file(&profile.path)?;
    ui.section(format!("{} ({})", profile.name, profile.status.label()));
    ui.println(content);

    Ok(())
}

/// Remember a profile as the current selection
pub fn select(paths: &Paths, name: &str, ui: &Ui) -> Result<()> {
    let profiles = load_profiles(paths)?;

    if find(&profiles, name).is_none() {
        bail!(
            "Profile '{}' not found.\nHint: Use 'ccswitch list' to see available profiles.",
            name
        );
    }

    save_selection_state(&paths.state_file, name);
    ui.ok(format!("Selected '{}'", name));
    ui.println(format!("Activate it with: {}", ui.bold("ccswitch use")));

    Ok(())
}

/// Ask the user to pick a profile to activate
fn prompt_for_profile(profiles: &[Profile]) -> Result<Option<String>> {
    let options: Vec<String> = profiles
        .iter()
        .filter(|p| !p.is_active())
        .map(|p| p.name.clone())
        .collect();

    if options.is_empty() {
        return Ok(None);
    }

    let choice = Select::new("Which profile should become active?", options)
        .with_help_message("Enter to activate, Esc to cancel")
        .prompt_skippable()
        .context("Profile selection cancelled")?;

    Ok(choice)
}

/// Switch to a profile
///
/// Only profiles from the enumerated list can be activated. Without a name, the
/// persisted selection is used if it still exists; otherwise the user is
/// prompted, or (non-interactively) the startup default applies.
pub fn use_profile(paths: &Paths, name: Option<&str>, ui: &Ui) -> Result<()> {
    let profiles = load_profiles(paths)?;

    let target = match name {
        Some(name) => match find(&profiles, name) {
            Some(profile) => Some(profile),
            None => bail!(
                "Profile '{}' not found.\nHint: Use 'ccswitch list' to see available profiles.",
                name
            ),
        },
        None => {
            let persisted = load_selection_state(&paths.state_file);
            match persisted.as_deref().and_then(|n| find(&profiles, n)) {
                Some(profile) => Some(profile),
                None if ui.is_interactive() => {
                    prompt_for_profile(&profiles)?.and_then(|n| find(&profiles, &n))
                }
                None => initial_selection(&profiles, None),
            }
        }
    };
    let Some(target) = target else {
        bail!(SwitchError::NoSelection);
    };

    let spinner = ui.spinner(format!("Switching to '{}'...", target.name));

    let result = match activate(&paths.active_file, &paths.backups_dir, Some(&target.path)) {
        Ok(result) => result,
        Err(e) if e.is_informational() => {
            spinner.finish_and_clear();
            ui.info(e.to_string());
            return Ok(());
        }
        Err(e) => {
            ui.spinner_finish_err(&spinner, format!("Switch failed: {}", e));
            return Err(e.into());
        }
    };

    ui.spinner_finish_ok(&spinner, format!("Switched to {}", result.activated));
    save_selection_state(&paths.state_file, &result.activated);

    if let Some(backup) = &result.backup {
        ui.println(ui.dim(format!("Previous settings saved to {}", backup.display())));
    }

    ui.newline();
    list(paths, ui)
}

/// Show the active file status and the persisted selection
pub fn current(paths: &Paths, ui: &Ui) -> Result<()> {
    ui.section("Current Config");
    ui.newline();

    let mut table = ui.simple_table();
    table.add_row(vec![
        ui.cell("Config dir:"),
        ui.cell(paths.config_dir.display().to_string()),
    ]);

    match enumerate(&paths.config_dir) {
        Ok(profiles) => {
            let active_cell = if !profiles.iter().any(|p| p.is_active()) {
                ui.colored_cell("missing", ui.palette.warning)
            } else if validate_json_file(&paths.active_file).is_ok() {
                ui.colored_cell("present", ui.palette.success)
            } else {
                ui.colored_cell("present (not valid JSON)", ui.palette.warning)
            };
            table.add_row(vec![ui.cell("settings.json:"), active_cell]);

            let synced: Vec<&str> = profiles
                .iter()
                .filter(|p| p.status == ProfileStatus::Synced)
                .map(|p| p.name.as_str())
                .collect();
            let matches = if synced.is_empty() {
                "(none)".to_string()
            } else {
                synced.join(", ")
            };
            table.add_row(vec![ui.cell("Matches:"), ui.header_cell(matches)]);
        }
        Err(e) => {
            table.add_row(vec![ui.cell("Status:"), ui.colored_cell(e.to_string(), ui.palette.error)]);
        }
    }

    let selected = load_selection_state(&paths.state_file).unwrap_or_else(|| "(none)".to_string());
    table.add_row(vec![ui.cell("Selected:"), ui.cell(selected)]);

    let last_backup = list_backups(&paths.backups_dir)
        .first()
        .map(|b| b.taken_at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "(none)".to_string());
    table.add_row(vec![ui.cell("Last backup:"), ui.cell(last_backup)]);

    ui.println(table.to_string());
    Ok(())
}

/// List all backups
pub fn backups(paths: &Paths, ui: &Ui) -> Result<()> {
    let backups = list_backups(&paths.backups_dir);

    if backups.is_empty() {
        ui.warn("No backups found.");
        ui.newline();
        ui.println("Backups are created automatically when switching profiles.");
        return Ok(());
    }

    ui.section("Backups");
    ui.newline();

    let mut table = ui.table();
    table.set_header(vec![
        ui.header_cell("File"),
        ui.header_cell("Taken"),
        ui.header_cell("Size"),
    ]);

    for backup in &backups {
        table.add_row(vec![
            ui.cell(&backup.name),
            ui.cell(backup.taken_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ui.cell(format_bytes(backup.size)),
        ]);
    }

    ui.println(table.to_string());
    ui.newline();
    ui.info(format!(
        "{} backup(s) in {}",
        backups.len(),
        paths.backups_dir.display()
    ));

    Ok(())
}

/// Reveal the config directory in the system file browser
pub fn open(paths: &Paths, ui: &Ui) -> Result<()> {
    if let Err(e) = reveal_in_file_browser(&paths.config_dir) {
        ui.err(format!("Failed to open directory: {:#}", e));
        return Err(e);
    }
    ui.ok(format!("Opened {}", paths.config_dir.display()));
    Ok(())
}

/// Run diagnostics
pub fn doctor(paths: &Paths, ui: &Ui) -> Result<()> {
    if run_doctor(paths, ui) {
        Ok(())
    } else {
        bail!("Some checks failed")
    }
}

/// Format bytes as human-readable string
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
