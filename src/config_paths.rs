//! Where richpad keeps its files
//!
//! - Unix/macOS: `$XDG_CONFIG_HOME/richpad/` or `~/.config/richpad/`
//! - Windows: `%APPDATA%\richpad\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "richpad";

/// Prefix of the daily-rotated log files (`richpad.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "richpad.log";

pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        env::var_os("APPDATA").map(PathBuf::from)
    } else {
        env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

/// `<config dir>/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    Some(config_dir()?.join("config.yaml"))
}

/// `<config dir>/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    Some(config_dir()?.join("logs"))
}

pub fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("Failed to create {}: {}", path.display(), e))
}

/// Create the logs dir if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or("No config directory available")?;
    ensure_dir(&logs)?;
    Ok(logs)
}
