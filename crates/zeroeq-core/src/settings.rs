//! The equalizer's parameter set and its snapshot type.
//!
//! [`EqParam`] names every parameter and owns its descriptor.
//! [`ChainSettings`] is a plain, `Copy` snapshot of all values, the only
//! input a [`FilterChain`](crate::FilterChain) is ever built from.
//!
//! ## Parameter Indices (`ParameterInfo`)
//!
//! | Index | Name | Range | Default |
//! |-------|------|-------|---------|
//! | 0 | LowCut Freq | 20–20000 Hz | 20 |
//! | 1 | HighCut Freq | 20–20000 Hz | 20000 |
//! | 2 | Peak Freq | 20–20000 Hz | 750 |
//! | 3 | Peak Gain | -24–24 dB | 0 |
//! | 4 | Peak Quality | 0.1–10 | 1 |
//! | 5 | LowCut Slope | 0–3 (12–48 dB/Oct) | 0 |
//! | 6 | HighCut Slope | 0–3 (12–48 dB/Oct) | 0 |
//! | 7 | LowCut Bypassed | off/on | off |
//! | 8 | Peak Bypassed | off/on | off |
//! | 9 | HighCut Bypassed | off/on | off |

use crate::math::{MAX_FREQUENCY, MAX_Q, MIN_FREQUENCY, MIN_Q};
use crate::param_info::{ParamDescriptor, ParamId, ParameterInfo};
use crate::slope::Slope;

/// Number of equalizer parameters.
pub const PARAM_COUNT: usize = 10;

/// Base of the stable parameter ID range.
const PARAM_ID_BASE: u32 = 100;

/// Every parameter of the equalizer, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqParam {
    /// Low-cut corner frequency (Hz).
    LowCutFreq,
    /// High-cut corner frequency (Hz).
    HighCutFreq,
    /// Peak centre frequency (Hz).
    PeakFreq,
    /// Peak gain (dB).
    PeakGain,
    /// Peak quality factor.
    PeakQuality,
    /// Low-cut slope ordinal.
    LowCutSlope,
    /// High-cut slope ordinal.
    HighCutSlope,
    /// Low-cut band bypass.
    LowCutBypassed,
    /// Peak band bypass.
    PeakBypassed,
    /// High-cut band bypass.
    HighCutBypassed,
}

impl EqParam {
    /// All parameters in index order.
    pub const ALL: [EqParam; PARAM_COUNT] = [
        EqParam::LowCutFreq,
        EqParam::HighCutFreq,
        EqParam::PeakFreq,
        EqParam::PeakGain,
        EqParam::PeakQuality,
        EqParam::LowCutSlope,
        EqParam::HighCutSlope,
        EqParam::LowCutBypassed,
        EqParam::PeakBypassed,
        EqParam::HighCutBypassed,
    ];

    /// Zero-based index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parameter at `index`, or `None` if out of range.
    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Descriptor with range, unit, default and stable IDs.
    pub const fn descriptor(self) -> ParamDescriptor {
        let id = ParamId(PARAM_ID_BASE + self as u32);
        match self {
            EqParam::LowCutFreq => {
                ParamDescriptor::frequency_hz("LowCut Freq", "LC Freq", MIN_FREQUENCY, MAX_FREQUENCY, 20.0)
                    .with_id(id, "lowcut_freq")
                    .with_group("low_cut")
            }
            EqParam::HighCutFreq => ParamDescriptor::frequency_hz(
                "HighCut Freq",
                "HC Freq",
                MIN_FREQUENCY,
                MAX_FREQUENCY,
                20000.0,
            )
            .with_id(id, "highcut_freq")
            .with_group("high_cut"),
            EqParam::PeakFreq => {
                ParamDescriptor::frequency_hz("Peak Freq", "Pk Freq", MIN_FREQUENCY, MAX_FREQUENCY, 750.0)
                    .with_id(id, "peak_freq")
                    .with_group("peak")
            }
            EqParam::PeakGain => ParamDescriptor::gain_db("Peak Gain", "Pk Gain", -24.0, 24.0, 0.0)
                .with_id(id, "peak_gain")
                .with_group("peak"),
            EqParam::PeakQuality => ParamDescriptor::quality("Peak Quality", "Pk Q", MIN_Q, MAX_Q, 1.0)
                .with_id(id, "peak_quality")
                .with_group("peak"),
            EqParam::LowCutSlope => ParamDescriptor::slope("LowCut Slope", "LC Slope")
                .with_id(id, "lowcut_slope")
                .with_group("low_cut"),
            EqParam::HighCutSlope => ParamDescriptor::slope("HighCut Slope", "HC Slope")
                .with_id(id, "highcut_slope")
                .with_group("high_cut"),
            EqParam::LowCutBypassed => ParamDescriptor::toggle("LowCut Bypassed", "LC Byp")
                .with_id(id, "lowcut_bypassed")
                .with_group("low_cut"),
            EqParam::PeakBypassed => ParamDescriptor::toggle("Peak Bypassed", "Pk Byp")
                .with_id(id, "peak_bypassed")
                .with_group("peak"),
            EqParam::HighCutBypassed => ParamDescriptor::toggle("HighCut Bypassed", "HC Byp")
                .with_id(id, "highcut_bypassed")
                .with_group("high_cut"),
        }
    }

    /// Looks a parameter up by its name, short name or string ID.
    pub fn from_name(name: &str) -> Option<Self> {
        ChainSettings::default()
            .find_param_by_name(name)
            .and_then(Self::from_index)
    }
}

impl core::fmt::Display for EqParam {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// Immutable snapshot of every parameter value.
///
/// Values held here are already clamped to their descriptor ranges; the
/// filter stages clamp again against the sample rate when designing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    /// Low-cut corner frequency (Hz).
    pub low_cut_freq: f32,
    /// High-cut corner frequency (Hz).
    pub high_cut_freq: f32,
    /// Peak centre frequency (Hz).
    pub peak_freq: f32,
    /// Peak gain (dB).
    pub peak_gain_db: f32,
    /// Peak quality factor.
    pub peak_quality: f32,
    /// Low-cut slope.
    pub low_cut_slope: Slope,
    /// High-cut slope.
    pub high_cut_slope: Slope,
    /// Low-cut band bypassed.
    pub low_cut_bypassed: bool,
    /// Peak band bypassed.
    pub peak_bypassed: bool,
    /// High-cut band bypassed.
    pub high_cut_bypassed: bool,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self::from_fn(|param| param.descriptor().default)
    }
}

impl ChainSettings {
    /// Builds a snapshot by reading each parameter from `read`.
    ///
    /// Every value passes through its descriptor's clamp, so a snapshot
    /// built from arbitrary input is always in range.
    ///
    /// ```rust
    /// use zeroeq_core::{ChainSettings, EqParam, Slope};
    ///
    /// let settings = ChainSettings::from_fn(|p| match p {
    ///     EqParam::LowCutSlope => 3.0,
    ///     EqParam::PeakQuality => -1.0,
    ///     other => other.descriptor().default,
    /// });
    /// assert_eq!(settings.low_cut_slope, Slope::Db48);
    /// assert_eq!(settings.peak_quality, 0.1);
    /// ```
    pub fn from_fn(mut read: impl FnMut(EqParam) -> f32) -> Self {
        let mut settings = Self {
            low_cut_freq: 0.0,
            high_cut_freq: 0.0,
            peak_freq: 0.0,
            peak_gain_db: 0.0,
            peak_quality: 0.0,
            low_cut_slope: Slope::Db12,
            high_cut_slope: Slope::Db12,
            low_cut_bypassed: false,
            peak_bypassed: false,
            high_cut_bypassed: false,
        };
        for param in EqParam::ALL {
            settings.set(param, read(param));
        }
        settings
    }

    /// Value of `param` in descriptor units.
    pub fn get(&self, param: EqParam) -> f32 {
        match param {
            EqParam::LowCutFreq => self.low_cut_freq,
            EqParam::HighCutFreq => self.high_cut_freq,
            EqParam::PeakFreq => self.peak_freq,
            EqParam::PeakGain => self.peak_gain_db,
            EqParam::PeakQuality => self.peak_quality,
            EqParam::LowCutSlope => self.low_cut_slope.ordinal() as f32,
            EqParam::HighCutSlope => self.high_cut_slope.ordinal() as f32,
            EqParam::LowCutBypassed => toggle_value(self.low_cut_bypassed),
            EqParam::PeakBypassed => toggle_value(self.peak_bypassed),
            EqParam::HighCutBypassed => toggle_value(self.high_cut_bypassed),
        }
    }

    /// Sets `param`, clamping to its descriptor range.
    pub fn set(&mut self, param: EqParam, value: f32) {
        let value = param.descriptor().clamp(value);
        match param {
            EqParam::LowCutFreq => self.low_cut_freq = value,
            EqParam::HighCutFreq => self.high_cut_freq = value,
            EqParam::PeakFreq => self.peak_freq = value,
            EqParam::PeakGain => self.peak_gain_db = value,
            EqParam::PeakQuality => self.peak_quality = value,
            EqParam::LowCutSlope => self.low_cut_slope = Slope::from_ordinal(value),
            EqParam::HighCutSlope => self.high_cut_slope = Slope::from_ordinal(value),
            EqParam::LowCutBypassed => self.low_cut_bypassed = value >= 0.5,
            EqParam::PeakBypassed => self.peak_bypassed = value >= 0.5,
            EqParam::HighCutBypassed => self.high_cut_bypassed = value >= 0.5,
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, param: EqParam, value: f32) -> Self {
        self.set(param, value);
        self
    }

    /// All values in index order.
    pub fn values(&self) -> [f32; PARAM_COUNT] {
        EqParam::ALL.map(|p| self.get(p))
    }
}

#[inline]
fn toggle_value(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

impl ParameterInfo for ChainSettings {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        EqParam::from_index(index).map(EqParam::descriptor)
    }

    fn get_param(&self, index: usize) -> f32 {
        EqParam::from_index(index).map_or(0.0, |p| self.get(p))
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if let Some(param) = EqParam::from_index(index) {
            self.set(param, value);
        }
    }
}
