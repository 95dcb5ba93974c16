// BoardVault platform paths
// Config and data directories per OS, overridable through environment variables.

use std::env;
use std::path::PathBuf;

/// Overrides the data directory on every platform.
pub const DATA_DIR_ENV: &str = "BOARDVAULT_DATA_DIR";

fn home_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let home = env::var("USERPROFILE");
    #[cfg(not(target_os = "windows"))]
    let home = env::var("HOME");
    PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
}

/// Returns the configuration directory for BoardVault.
///
/// - **Linux**: `$XDG_CONFIG_HOME/boardvault` or `~/.config/boardvault`
/// - **macOS**: `~/Library/Application Support/BoardVault`
/// - **Windows**: `%APPDATA%/BoardVault`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("BoardVault")
    }
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
            .join("BoardVault")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("boardvault"),
            Err(_) => home_dir().join(".config").join("boardvault"),
        }
    }
}

/// Returns the data directory for BoardVault. `BOARDVAULT_DATA_DIR` wins when set.
///
/// - **Linux**: `$XDG_DATA_HOME/boardvault` or `~/.local/share/boardvault`
/// - **macOS** / **Windows**: same as the config directory
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    #[cfg(any(target_os = "macos", target_os = "windows"))]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("boardvault"),
            Err(_) => home_dir().join(".local").join("share").join("boardvault"),
        }
    }
}
