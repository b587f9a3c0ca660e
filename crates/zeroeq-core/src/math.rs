//! Mathematical utility functions for the filter chain.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Parameter Guards
//!
//! Coefficient design must never see a frequency at or above Nyquist or a
//! non-positive Q. These helpers clamp into the stable region instead of
//! failing, so a bad automation value degrades instead of halting audio.
//!
//! - [`nyquist_limit`] - Highest frequency a stage is designed at
//! - [`clamp_frequency`] - Clamp a frequency into `[MIN_FREQUENCY, nyquist_limit]`
//! - [`clamp_q`] - Clamp a quality factor to `>= MIN_Q`
//!
//! # Axis Mapping
//!
//! - [`log_interpolate`] / [`log_position`] - Logarithmic frequency axis
//! - [`map_range`] - Linear range mapping (dB to pixels)

use libm::{expf, logf};

/// Lowest frequency any stage is designed at, in Hz.
pub const MIN_FREQUENCY: f32 = 20.0;

/// Highest frequency exposed to users, in Hz.
pub const MAX_FREQUENCY: f32 = 20000.0;

/// Smallest quality factor a stage is designed with.
pub const MIN_Q: f32 = 0.1;

/// Largest quality factor a stage is designed with.
pub const MAX_Q: f32 = 10.0;

/// Fraction of the sample rate used as the design ceiling (95% of Nyquist).
const NYQUIST_MARGIN: f32 = 0.475;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use zeroeq_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored, so the result is always finite.
///
/// # Example
/// ```rust
/// use zeroeq_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Highest frequency a stage is designed at for the given sample rate.
///
/// Sits at 95% of Nyquist to keep the bilinear transform away from the
/// numerically unstable region near `fs / 2`.
#[inline]
pub fn nyquist_limit(sample_rate: f32) -> f32 {
    sample_rate * NYQUIST_MARGIN
}

/// Clamp a frequency into the designable range for `sample_rate`.
///
/// Non-finite input collapses to [`MIN_FREQUENCY`].
///
/// ```rust
/// use zeroeq_core::clamp_frequency;
///
/// assert_eq!(clamp_frequency(5.0, 48000.0), 20.0);
/// assert!(clamp_frequency(30000.0, 48000.0) < 24000.0);
/// assert_eq!(clamp_frequency(f32::NAN, 48000.0), 20.0);
/// ```
#[inline]
pub fn clamp_frequency(freq: f32, sample_rate: f32) -> f32 {
    if !freq.is_finite() {
        return MIN_FREQUENCY;
    }
    let ceiling = nyquist_limit(sample_rate).max(MIN_FREQUENCY);
    freq.clamp(MIN_FREQUENCY, ceiling)
}

/// Clamp a quality factor to `[MIN_Q, MAX_Q]`.
///
/// Zero, negative and non-finite values become [`MIN_Q`].
#[inline]
pub fn clamp_q(q: f32) -> f32 {
    if q.is_finite() { q.clamp(MIN_Q, MAX_Q) } else { MIN_Q }
}

/// Geometric interpolation between `min` and `max`.
///
/// `t = 0` yields `min`, `t = 1` yields `max`, and equal steps in `t`
/// are equal frequency ratios.
#[inline]
pub fn log_interpolate(min: f32, max: f32, t: f32) -> f32 {
    min * libm::powf(max / min, t)
}

/// Inverse of [`log_interpolate`]: position of `value` on a log axis.
#[inline]
pub fn log_position(min: f32, max: f32, value: f32) -> f32 {
    if value <= 0.0 || min <= 0.0 || max <= min {
        return 0.0;
    }
    logf(value / min) / logf(max / min)
}

/// Linearly map `value` from `[src_min, src_max]` to `[dst_min, dst_max]`.
#[inline]
pub fn map_range(value: f32, src_min: f32, src_max: f32, dst_min: f32, dst_max: f32) -> f32 {
    let span = src_max - src_min;
    if span == 0.0 {
        return dst_min;
    }
    dst_min + (value - src_min) / span * (dst_max - dst_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_roundtrip() {
        for db in [-48.0, -12.0, 0.0, 6.0, 24.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 0.001, "{db} -> {back}");
        }
    }

    #[test]
    fn test_linear_to_db_floor() {
        assert!(linear_to_db(0.0).is_finite());
        assert!(linear_to_db(-1.0).is_finite());
    }

    #[test]
    fn test_clamp_frequency_low_sample_rate() {
        // 22.05 kHz: 20 kHz must be pulled under Nyquist
        let f = clamp_frequency(20000.0, 22050.0);
        assert!(f < 11025.0);
        assert!((f - 10473.75).abs() < 0.01);
    }

    #[test]
    fn test_clamp_q() {
        assert_eq!(clamp_q(0.0), MIN_Q);
        assert_eq!(clamp_q(-3.0), MIN_Q);
        assert_eq!(clamp_q(f32::INFINITY), MIN_Q);
        assert_eq!(clamp_q(1.0), 1.0);
        assert_eq!(clamp_q(50.0), MAX_Q);
    }

    #[test]
    fn test_log_axis_inverse() {
        let f = log_interpolate(20.0, 20000.0, 0.5);
        assert!((f - 632.455).abs() < 0.1);
        assert!((log_position(20.0, 20000.0, f) - 0.5).abs() < 1e-4);
        assert_eq!(log_position(20.0, 20000.0, -1.0), 0.0);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.0, -24.0, 24.0, 100.0, 0.0), 50.0);
        assert_eq!(map_range(24.0, -24.0, 24.0, 100.0, 0.0), 0.0);
        assert_eq!(map_range(1.0, 1.0, 1.0, 5.0, 9.0), 5.0);
    }
}
