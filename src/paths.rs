use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::PathBuf;

/// Name of the config file the Claude Code CLI actually reads
pub const ACTIVE_FILE_NAME: &str = "settings.json";

/// All computed paths used by ccswitch
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.claude (the profile directory)
    pub config_dir: PathBuf,
    /// ~/.claude/settings.json
    pub active_file: PathBuf,
    /// ~/.claude/backups
    pub backups_dir: PathBuf,
    /// ~/.claude/.cc-cache
    pub state_file: PathBuf,
}

impl Paths {
    /// Default layout rooted at ~/.claude
    pub fn new() -> Result<Self> {
        let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
        Ok(Self::at(base_dirs.home_dir().join(".claude")))
    }

    /// Layout rooted at an explicit directory (from `--dir` / `CCSWITCH_DIR`),
    /// falling back to the default when none is given.
    pub fn resolve(dir_override: Option<PathBuf>) -> Result<Self> {
        match dir_override {
            Some(dir) => Ok(Self::at(dir)),
            None => Self::new(),
        }
    }

    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            active_file: config_dir.join(ACTIVE_FILE_NAME),
            backups_dir: config_dir.join("backups"),
            state_file: config_dir.join(".cc-cache"),
            config_dir,
        }
    }

    /// Get the path of a profile file by name
    pub fn profile_file(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }
}
