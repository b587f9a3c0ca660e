//! A single second-order stage of the filter chain.
//!
//! A [`FilterStage`] is produced whole by one of its constructors and never
//! patched afterwards. Every constructor clamps its inputs into the stable
//! region, and any coefficient set that still comes out non-finite or
//! unstable is replaced by the identity stage, so unstable coefficients
//! can't reach the audio path.

use crate::biquad::{
    BiquadCoefficients, highpass_coefficients, lowpass_coefficients, peaking_eq_coefficients,
};
use crate::math::{clamp_frequency, clamp_q};
use crate::slope::butterworth_section_q;

/// Gain range accepted by the peak stage, in dB.
pub const PEAK_GAIN_RANGE: (f32, f32) = (-24.0, 24.0);

/// What a stage was designed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Pass-through: unity gain, no phase contribution.
    Identity,
    /// Parametric bell.
    Peak,
    /// High-pass section of the low-cut bank.
    LowCut,
    /// Low-pass section of the high-cut bank.
    HighCut,
}

/// Which side of the spectrum a cut stage removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutKind {
    /// Removes content below the cutoff (high-pass).
    LowCut,
    /// Removes content above the cutoff (low-pass).
    HighCut,
}

impl CutKind {
    /// Stage kind produced for active sections of this cut.
    pub const fn stage_kind(self) -> StageKind {
        match self {
            CutKind::LowCut => StageKind::LowCut,
            CutKind::HighCut => StageKind::HighCut,
        }
    }
}

/// One biquad section with the sample rate it was designed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStage {
    kind: StageKind,
    coefficients: BiquadCoefficients,
    sample_rate: f32,
}

impl FilterStage {
    /// Identity stage for `sample_rate`.
    pub const fn identity(sample_rate: f32) -> Self {
        Self {
            kind: StageKind::Identity,
            coefficients: BiquadCoefficients::IDENTITY,
            sample_rate,
        }
    }

    /// Parametric peaking stage.
    ///
    /// `frequency` is clamped below Nyquist, `gain_db` into
    /// [`PEAK_GAIN_RANGE`] and `q` to a positive minimum.
    pub fn peak(frequency: f32, gain_db: f32, q: f32, sample_rate: f32) -> Self {
        if !valid_sample_rate(sample_rate) {
            return Self::identity(sample_rate);
        }
        let frequency = clamp_frequency(frequency, sample_rate);
        let gain_db = if gain_db.is_finite() {
            gain_db.clamp(PEAK_GAIN_RANGE.0, PEAK_GAIN_RANGE.1)
        } else {
            0.0
        };
        let coefficients = peaking_eq_coefficients(frequency, clamp_q(q), gain_db, sample_rate);
        Self::guarded(StageKind::Peak, coefficients, sample_rate)
    }

    /// Section `section` of an `order`-section Butterworth cut.
    ///
    /// Uses the per-section Q from [`butterworth_section_q`], so a full
    /// cascade of `order` sections matches a single Butterworth filter of
    /// degree `2 * order`.
    pub fn cut(kind: CutKind, frequency: f32, section: usize, order: usize, sample_rate: f32) -> Self {
        if !valid_sample_rate(sample_rate) {
            return Self::identity(sample_rate);
        }
        let frequency = clamp_frequency(frequency, sample_rate);
        let q = butterworth_section_q(section, order);
        let coefficients = match kind {
            CutKind::LowCut => highpass_coefficients(frequency, q, sample_rate),
            CutKind::HighCut => lowpass_coefficients(frequency, q, sample_rate),
        };
        Self::guarded(kind.stage_kind(), coefficients, sample_rate)
    }

    fn guarded(kind: StageKind, coefficients: BiquadCoefficients, sample_rate: f32) -> Self {
        if coefficients.is_stable() {
            Self {
                kind,
                coefficients,
                sample_rate,
            }
        } else {
            Self::identity(sample_rate)
        }
    }

    /// Stage kind.
    #[inline]
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Normalized coefficients for the audio path.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coefficients
    }

    /// Sample rate the coefficients were computed against.
    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// `true` for pass-through stages.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.kind == StageKind::Identity
    }

    /// This stage's magnitude contribution in dB at `freq_hz`.
    ///
    /// Identity stages contribute exactly `0.0`.
    pub fn magnitude_db(&self, freq_hz: f64) -> f64 {
        if self.is_identity() {
            return 0.0;
        }
        self.coefficients.magnitude_db(freq_hz, self.sample_rate as f64)
    }
}

#[inline]
fn valid_sample_rate(sample_rate: f32) -> bool {
    sample_rate.is_finite() && sample_rate > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    #[test]
    fn test_identity_contributes_nothing() {
        let stage = FilterStage::identity(SR);
        assert!(stage.is_identity());
        assert_eq!(stage.magnitude_db(1000.0), 0.0);
        assert_eq!(stage.sample_rate(), SR);
    }

    #[test]
    fn test_peak_stage_gain() {
        let stage = FilterStage::peak(1000.0, 6.0, 1.0, SR);
        assert_eq!(stage.kind(), StageKind::Peak);
        assert!((stage.magnitude_db(1000.0) - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_peak_non_positive_q_is_clamped() {
        for q in [0.0, -1.0, f32::NAN, f32::NEG_INFINITY] {
            let stage = FilterStage::peak(1000.0, 6.0, q, SR);
            assert!(stage.coefficients().is_finite(), "q={q}");
            assert!(stage.coefficients().is_stable(), "q={q}");
            assert!(stage.magnitude_db(1000.0).is_finite());
        }
    }

    #[test]
    fn test_peak_gain_clamped() {
        let stage = FilterStage::peak(1000.0, 100.0, 1.0, SR);
        assert!((stage.magnitude_db(1000.0) - 24.0).abs() < 0.05);
    }

    #[test]
    fn test_cut_above_nyquist_is_clamped() {
        let stage = FilterStage::cut(CutKind::HighCut, 40000.0, 0, 1, SR);
        assert_eq!(stage.kind(), StageKind::HighCut);
        assert!(stage.coefficients().is_stable());
        assert!(stage.magnitude_db(100.0).abs() < 0.01);
    }

    #[test]
    fn test_invalid_sample_rate_gives_identity() {
        assert!(FilterStage::peak(1000.0, 6.0, 1.0, 0.0).is_identity());
        assert!(FilterStage::cut(CutKind::LowCut, 100.0, 0, 1, f32::NAN).is_identity());
    }

    #[test]
    fn test_cut_kinds() {
        let low = FilterStage::cut(CutKind::LowCut, 1000.0, 0, 1, SR);
        let high = FilterStage::cut(CutKind::HighCut, 1000.0, 0, 1, SR);
        assert!(low.magnitude_db(100.0) < -30.0);
        assert!(high.magnitude_db(100.0).abs() < 0.1);
        assert!(high.magnitude_db(10000.0) < -30.0);
    }
}
