//! Parameter introspection for the equalizer.
//!
//! This module provides the [`ParameterInfo`] trait and the descriptor types
//! that let hosts, editors and command-line tools discover parameters at
//! runtime: their ranges, units, normalization curves and display text.
//!
//! # Design
//!
//! Access is index-based. Each parameter is described by a
//! [`ParamDescriptor`] carrying:
//!
//! - [`ParamId`] - stable numeric ID for automation and persistence
//! - [`ParamScale`] - normalization curve (linear or logarithmic)
//! - [`ParamFlags`] - capability flags (automatable, stepped)
//! - `string_id` - human-readable stable ID
//! - `group` - band the parameter belongs to
//!
//! # Example
//!
//! ```rust
//! use zeroeq_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -12.0, 12.0, 0.0)
//!                 .with_id(ParamId(900), "trim_gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-12.0, 12.0);
//!         }
//!     }
//! }
//! ```

use alloc::format;
use alloc::string::String;

use crate::slope::Slope;

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\].
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Used for frequencies; requires `min > 0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// ```rust
/// use zeroeq_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps (slopes, toggles).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels, for gain.
    Decibels,
    /// Hertz, for frequencies.
    Hertz,
    /// Dimensionless quality factor.
    Quality,
    /// Cut slope ordinal, displayed as dB/Oct.
    Slope,
    /// On/off switch stored as 0.0 / 1.0.
    Toggle,
}

/// Trait for types that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the implementor. Out-of-range indices are handled gracefully: getters
/// return `0.0`, setters do nothing.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its descriptor range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches [`ParamDescriptor::name`], [`ParamDescriptor::short_name`]
    /// and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// `short_name` stays within 8 characters for narrow displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name (e.g. "Peak Freq").
    pub name: &'static str,
    /// Short name, max 8 characters.
    pub short_name: &'static str,
    /// Unit used for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value on construction and reset.
    pub default: f32,
    /// Recommended increment for encoder-style control.
    pub step: f32,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Stable string ID (e.g. `"peak_freq"`).
    pub string_id: &'static str,
    /// Normalization curve.
    pub scale: ParamScale,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Band the parameter belongs to (`"low_cut"`, `"peak"`, `"high_cut"`).
    pub group: &'static str,
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Frequency parameter in Hz with logarithmic scaling.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Hertz, min, max, default, 1.0)
            .with_scale(ParamScale::Logarithmic)
    }

    /// Gain parameter in dB.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Decibels, min, max, default, 0.5)
    }

    /// Quality-factor parameter.
    pub const fn quality(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Quality, min, max, default, 0.05)
    }

    /// Cut slope ordinal parameter (0–3, stepped).
    pub const fn slope(name: &'static str, short_name: &'static str) -> Self {
        Self::base(name, short_name, ParamUnit::Slope, 0.0, 3.0, 0.0, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Stepped on/off parameter, default off.
    pub const fn toggle(name: &'static str, short_name: &'static str) -> Self {
        Self::base(name, short_name, ParamUnit::Toggle, 0.0, 1.0, 0.0, 1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN collapses to the default and stepped parameters are rounded.
    ///
    /// ```rust
    /// use zeroeq_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -24.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.flags.contains(ParamFlags::STEPPED) {
            libm::roundf(clamped)
        } else {
            clamped
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// ```rust
    /// use zeroeq_core::ParamDescriptor;
    ///
    /// let freq = ParamDescriptor::frequency_hz("Freq", "Freq", 20.0, 20000.0, 1000.0);
    /// assert_eq!(freq.normalize(20.0), 0.0);
    /// assert!((freq.normalize(632.4555) - 0.5).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }

    /// Display text for `value`.
    ///
    /// | Unit      | Example                       |
    /// |-----------|-------------------------------|
    /// | Hertz     | `"750 Hz"`, `"1.20 kHz"`       |
    /// | Decibels  | `"-3.5 dB"`                   |
    /// | Quality   | `"0.71"`                      |
    /// | Slope     | `"12 + ordinal * 12 dB/Oct"`  |
    /// | Toggle    | `"On"` / `"Off"`              |
    ///
    /// ```rust
    /// use zeroeq_core::ParamDescriptor;
    ///
    /// let slope = ParamDescriptor::slope("LowCut Slope", "LC Slope");
    /// assert_eq!(slope.format_value(2.0), "36 dB/Oct");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Hertz if value >= 1000.0 => format!("{:.2} kHz", value / 1000.0),
            ParamUnit::Hertz => format!("{value:.0} Hz"),
            ParamUnit::Decibels => format!("{value:.1} dB"),
            ParamUnit::Quality => format!("{value:.2}"),
            ParamUnit::Slope => String::from(Slope::from_ordinal(value).label()),
            ParamUnit::Toggle if value >= 0.5 => String::from("On"),
            ParamUnit::Toggle => String::from("Off"),
        }
    }
}
