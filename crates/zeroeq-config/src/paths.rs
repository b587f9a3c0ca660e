//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/zeroeq/` (Linux), `~/Library/Application Support/zeroeq/` (macOS), `%APPDATA%\zeroeq\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use zeroeq_config::{EditorConfig, paths};
//!
//! let config = EditorConfig::load_or_default(paths::default_config_path()).unwrap();
//! println!("refresh: {} Hz", config.refresh_hz);
//! ```

use std::path::PathBuf;

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "zeroeq";

/// File name of the editor configuration.
pub const CONFIG_FILE_NAME: &str = "editor.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's editor configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}
