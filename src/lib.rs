pub mod backups;
pub mod commands;
pub mod doctor;
pub mod error;
pub mod fs_utils;
pub mod logging;
pub mod paths;
pub mod preview;
pub mod profiles;
pub mod state;
pub mod switch;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
