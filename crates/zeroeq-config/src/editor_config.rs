//! Editor configuration: host sample rate, refresh rate and plot geometry.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroeq_editor::{CurveLayout, DEFAULT_REFRESH_HZ};

use crate::error::ConfigError;

/// Plot geometry of the response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Number of pixel columns.
    pub width: usize,
    /// Plot height in pixels.
    pub height: f32,
    /// dB at the bottom edge.
    pub min_db: f32,
    /// dB at the top edge.
    pub max_db: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        let layout = CurveLayout::default();
        Self {
            width: layout.width,
            height: layout.height,
            min_db: layout.min_db,
            max_db: layout.max_db,
        }
    }
}

/// Top-level editor configuration, stored as TOML.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```rust
/// use zeroeq_config::EditorConfig;
///
/// let config = EditorConfig::from_toml_str(
///     r#"
///     sample_rate = 44100.0
///
///     [curve]
///     width = 800
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.sample_rate, 44100.0);
/// assert_eq!(config.refresh_hz, 30.0);
/// assert_eq!(config.curve_layout().width, 800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Sample rate the chain is designed for, in Hz.
    pub sample_rate: f32,
    /// Response-curve refresh rate, in ticks per second.
    pub refresh_hz: f32,
    /// Plot geometry.
    pub curve: CurveConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            refresh_hz: DEFAULT_REFRESH_HZ,
            curve: CurveConfig::default(),
        }
    }
}

/// Supported sample-rate range, in Hz.
pub const SAMPLE_RATE_RANGE: (f32, f32) = (8000.0, 384_000.0);

/// Supported refresh-rate range, in ticks per second.
pub const REFRESH_HZ_RANGE: (f32, f32) = (1.0, 240.0);

/// Largest supported curve width, in columns.
pub const MAX_CURVE_WIDTH: usize = 16384;

impl EditorConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate and save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("sample_rate", self.sample_rate, SAMPLE_RATE_RANGE)?;
        check_range("refresh_hz", self.refresh_hz, REFRESH_HZ_RANGE)?;

        let curve = &self.curve;
        if !(2..=MAX_CURVE_WIDTH).contains(&curve.width) {
            return Err(ConfigError::invalid(
                "curve.width",
                format!("{} is outside 2..={MAX_CURVE_WIDTH}", curve.width),
            ));
        }
        if !(curve.height.is_finite() && curve.height > 0.0) {
            return Err(ConfigError::invalid(
                "curve.height",
                format!("{} is not a positive size", curve.height),
            ));
        }
        if !(curve.min_db.is_finite() && curve.max_db.is_finite()) {
            return Err(ConfigError::invalid("curve.min_db", "dB range must be finite"));
        }
        if curve.min_db >= curve.max_db {
            return Err(ConfigError::invalid(
                "curve.max_db",
                format!("{} must be above min_db {}", curve.max_db, curve.min_db),
            ));
        }
        Ok(())
    }

    /// Plot layout for the response-curve engine.
    pub fn curve_layout(&self) -> CurveLayout {
        CurveLayout::new(self.curve.width, self.curve.height)
            .with_db_range(self.curve.min_db, self.curve.max_db)
    }
}

fn check_range(field: &'static str, value: f32, (min, max): (f32, f32)) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is outside {min}..={max}"),
        ))
    }
}
