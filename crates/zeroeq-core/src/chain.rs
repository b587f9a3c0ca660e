//! The fixed three-band filter chain.
//!
//! Topology: low-cut bank (4 stages) → peak stage → high-cut bank (4 stages),
//! nine slots in total. The chain is rebuilt wholesale from a
//! [`ChainSettings`] snapshot and never patched stage by stage.

use crate::cut_bank::CutFilterBank;
use crate::filter_stage::{CutKind, FilterStage};
use crate::settings::ChainSettings;
use crate::slope::MAX_SECTIONS;

/// Number of stage slots in a [`FilterChain`].
pub const CHAIN_SLOTS: usize = 2 * MAX_SECTIONS + 1;

/// Low-cut, peak and high-cut stages with the sample rate they were built for.
///
/// # Example
///
/// ```rust
/// use zeroeq_core::{ChainSettings, EqParam, FilterChain};
///
/// let settings = ChainSettings::default()
///     .with(EqParam::PeakFreq, 1000.0)
///     .with(EqParam::PeakGain, 6.0);
/// let chain = FilterChain::new(&settings, 48000.0);
///
/// assert!((chain.magnitude_db_at(1000.0) - 6.0).abs() < 0.1);
/// assert_eq!(chain.stages().count(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterChain {
    low_cut: CutFilterBank,
    peak: FilterStage,
    high_cut: CutFilterBank,
    sample_rate: f32,
}

impl FilterChain {
    /// Builds a chain from `settings` at `sample_rate`.
    pub fn new(settings: &ChainSettings, sample_rate: f32) -> Self {
        let low_cut = if settings.low_cut_bypassed {
            CutFilterBank::bypassed(sample_rate)
        } else {
            CutFilterBank::build(
                CutKind::LowCut,
                settings.low_cut_freq,
                settings.low_cut_slope,
                sample_rate,
            )
        };

        let peak = if settings.peak_bypassed {
            FilterStage::identity(sample_rate)
        } else {
            FilterStage::peak(
                settings.peak_freq,
                settings.peak_gain_db,
                settings.peak_quality,
                sample_rate,
            )
        };

        let high_cut = if settings.high_cut_bypassed {
            CutFilterBank::bypassed(sample_rate)
        } else {
            CutFilterBank::build(
                CutKind::HighCut,
                settings.high_cut_freq,
                settings.high_cut_slope,
                sample_rate,
            )
        };

        Self {
            low_cut,
            peak,
            high_cut,
            sample_rate,
        }
    }

    /// Recomputes every stage from `settings`.
    ///
    /// The new chain is built as a local value and assigned in one step, so
    /// a half-updated chain is never observable through `&self`.
    pub fn rebuild(&mut self, settings: &ChainSettings, sample_rate: f32) {
        let chain = Self::new(settings, sample_rate);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            active = chain.active_stage_count(),
            "filter chain rebuilt"
        );
        *self = chain;
    }

    /// Total magnitude of the chain in dB at `freq_hz`.
    ///
    /// Sum of every stage's contribution; identity stages add exactly zero.
    pub fn magnitude_db_at(&self, freq_hz: f64) -> f64 {
        self.stages().map(|s| s.magnitude_db(freq_hz)).sum()
    }

    /// All nine stages in series order.
    pub fn stages(&self) -> impl Iterator<Item = &FilterStage> + '_ {
        self.low_cut
            .stages()
            .iter()
            .chain(core::iter::once(&self.peak))
            .chain(self.high_cut.stages().iter())
    }

    /// Low-cut bank.
    #[inline]
    pub fn low_cut(&self) -> &CutFilterBank {
        &self.low_cut
    }

    /// Peak stage.
    #[inline]
    pub fn peak(&self) -> &FilterStage {
        &self.peak
    }

    /// High-cut bank.
    #[inline]
    pub fn high_cut(&self) -> &CutFilterBank {
        &self.high_cut
    }

    /// Sample rate of the last rebuild.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// `true` when the chain was computed against a different sample rate.
    #[inline]
    pub fn needs_rebuild(&self, sample_rate: f32) -> bool {
        self.sample_rate.to_bits() != sample_rate.to_bits()
    }

    /// Number of non-identity stages.
    pub fn active_stage_count(&self) -> usize {
        self.stages().filter(|s| !s.is_identity()).count()
    }
}
