//! Configuration for the ZeroEQ editor.
//!
//! Holds the settings the editor needs from outside: the host sample rate,
//! how often the response curve refreshes and the plot geometry. Stored as
//! TOML with a default for every field.
//!
//! # Example
//!
//! ```rust,no_run
//! use zeroeq_config::{EditorConfig, paths};
//!
//! let mut config = EditorConfig::default();
//! config.refresh_hz = 60.0;
//! config.save(paths::default_config_path()).unwrap();
//!
//! let layout = config.curve_layout();
//! ```

mod editor_config;
mod error;

/// Platform-specific configuration paths.
#[cfg(feature = "std")]
pub mod paths;

pub use editor_config::{
    CurveConfig, EditorConfig, MAX_CURVE_WIDTH, REFRESH_HZ_RANGE, SAMPLE_RATE_RANGE,
};
pub use error::ConfigError;

#[cfg(feature = "std")]
pub use paths::{default_config_path, user_config_dir};
