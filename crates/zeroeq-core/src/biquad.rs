//! Biquad (bi-quadratic) filter coefficients, state, and frequency response.
//!
//! Coefficient design uses the RBJ Audio EQ Cookbook formulas. Coefficients
//! and filter state stay in `f64`: low cut-offs at high sample rates put the
//! poles within `1e-3` of the unit circle, where `f32` rounding visibly moves
//! the corner. Magnitude evaluation runs on the same stored coefficients so
//! the plotted curve matches what the audio path applies.

use core::f64::consts::PI;
use libm::{cos, log10, pow, sin};

/// Magnitude floor returned by [`BiquadCoefficients::magnitude_db`].
pub const MAGNITUDE_FLOOR_DB: f64 = -240.0;

/// Normalized biquad coefficients (`a0 == 1`).
///
/// Transfer function:
/// ```text
///         b0 + b1*z^-1 + b2*z^-2
/// H(z) = ------------------------
///          1 + a1*z^-1 + a2*z^-2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficient for `x[n]`.
    pub b0: f64,
    /// Feedforward coefficient for `x[n-1]`.
    pub b1: f64,
    /// Feedforward coefficient for `x[n-2]`.
    pub b2: f64,
    /// Feedback coefficient for `y[n-1]`.
    pub a1: f64,
    /// Feedback coefficient for `y[n-2]`.
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Pass-through coefficients: `y[n] = x[n]`.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds coefficients from raw cookbook terms, normalizing by `a0`.
    pub fn from_raw(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Returns `true` if these are exactly the pass-through coefficients.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Returns `true` if every coefficient is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.b0.is_finite()
            && self.b1.is_finite()
            && self.b2.is_finite()
            && self.a1.is_finite()
            && self.a2.is_finite()
    }

    /// Returns `true` if both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle: `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.is_finite() && self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }

    /// Squared magnitude `|H(e^jw)|^2` at `freq_hz`.
    pub fn magnitude_squared(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        let (c1, s1) = (cos(omega), sin(omega));
        let (c2, s2) = (cos(2.0 * omega), sin(2.0 * omega));

        let (b0, b1, b2) = (self.b0, self.b1, self.b2);
        let (a1, a2) = (self.a1, self.a2);

        let num_re = b0 + b1 * c1 + b2 * c2;
        let num_im = -(b1 * s1 + b2 * s2);
        let den_re = 1.0 + a1 * c1 + a2 * c2;
        let den_im = -(a1 * s1 + a2 * s2);

        (num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)
    }

    /// Magnitude response in dB at `freq_hz`, floored at [`MAGNITUDE_FLOOR_DB`].
    ///
    /// Always finite: degenerate numerators hit the floor and degenerate
    /// denominators are capped at `-MAGNITUDE_FLOOR_DB`.
    pub fn magnitude_db(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        if self.is_identity() {
            return 0.0;
        }
        let mag_sq = self.magnitude_squared(freq_hz, sample_rate);
        if mag_sq.is_nan() {
            return MAGNITUDE_FLOOR_DB;
        }
        // 10*log10(|H|^2) == 20*log10(|H|)
        (10.0 * log10(mag_sq.max(1e-24))).clamp(MAGNITUDE_FLOOR_DB, -MAGNITUDE_FLOOR_DB)
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Stateful biquad filter for the audio path.
///
/// Implements the Direct Form I biquad structure, with `f64` delay lines:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coefficients: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self {
            coefficients: BiquadCoefficients::IDENTITY,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Replaces the coefficients, keeping the delay lines.
    ///
    /// Keeping state avoids a click when coefficients change mid-stream.
    #[inline]
    pub fn set_coefficients(&mut self, coefficients: BiquadCoefficients) {
        self.coefficients = coefficients;
    }

    /// Current coefficients.
    #[inline]
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coefficients
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let input = input as f64;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output as f32
    }

    /// Clears the filter state (delay lines).
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-pass coefficients (RBJ cookbook). Used by high-cut sections.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for a single Butterworth section)
/// * `sample_rate` - Sample rate in Hz
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = 2.0 * PI * frequency as f64 / sample_rate as f64;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q as f64);

    BiquadCoefficients::from_raw(
        (1.0 - cos_omega) / 2.0,
        1.0 - cos_omega,
        (1.0 - cos_omega) / 2.0,
        1.0 + alpha,
        -2.0 * cos_omega,
        1.0 - alpha,
    )
}

/// High-pass coefficients (RBJ cookbook). Used by low-cut sections.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.707 for a single Butterworth section)
/// * `sample_rate` - Sample rate in Hz
pub fn highpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> BiquadCoefficients {
    let omega = 2.0 * PI * frequency as f64 / sample_rate as f64;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q as f64);

    BiquadCoefficients::from_raw(
        (1.0 + cos_omega) / 2.0,
        -(1.0 + cos_omega),
        (1.0 + cos_omega) / 2.0,
        1.0 + alpha,
        -2.0 * cos_omega,
        1.0 - alpha,
    )
}

/// Peaking EQ coefficients (RBJ cookbook).
///
/// Boosts or cuts around `frequency` and leaves the response at unity
/// away from it.
///
/// # Arguments
///
/// * `frequency` - Center frequency in Hz
/// * `q` - Q factor (bandwidth = frequency / Q)
/// * `gain_db` - Gain in decibels (positive = boost, negative = cut)
/// * `sample_rate` - Sample rate in Hz
pub fn peaking_eq_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> BiquadCoefficients {
    let a = pow(10.0, gain_db as f64 / 40.0); // sqrt(10^(dB/20))
    let omega = 2.0 * PI * frequency as f64 / sample_rate as f64;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q as f64);

    BiquadCoefficients::from_raw(
        1.0 + alpha * a,
        -2.0 * cos_omega,
        1.0 - alpha * a,
        1.0 + alpha / a,
        -2.0 * cos_omega,
        1.0 - alpha / a,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;

    #[test]
    fn test_biquad_passthrough() {
        let mut biquad = Biquad::new();

        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = biquad.process(input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_biquad_clear() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(1000.0, 0.707, SR));

        for _ in 0..10 {
            biquad.process(1.0);
        }
        biquad.clear();

        assert_eq!(biquad.x1, 0.0);
        assert_eq!(biquad.x2, 0.0);
        assert_eq!(biquad.y1, 0.0);
        assert_eq!(biquad.y2, 0.0);
    }

    #[test]
    fn test_identity_response_is_flat() {
        let c = BiquadCoefficients::IDENTITY;
        assert!(c.is_identity());
        for f in [20.0, 1000.0, 20000.0] {
            assert_eq!(c.magnitude_db(f, SR as f64), 0.0);
        }
    }

    #[test]
    fn test_lowpass_response() {
        let c = lowpass_coefficients(1000.0, core::f32::consts::FRAC_1_SQRT_2, SR);
        assert!(c.is_stable());
        assert!(c.magnitude_db(10.0, SR as f64).abs() < 0.01);
        assert!((c.magnitude_db(1000.0, SR as f64) + 3.01).abs() < 0.05);
        assert!(c.magnitude_db(10000.0, SR as f64) < -35.0);
    }

    #[test]
    fn test_highpass_response() {
        let c = highpass_coefficients(1000.0, core::f32::consts::FRAC_1_SQRT_2, SR);
        assert!(c.is_stable());
        assert!((c.magnitude_db(1000.0, SR as f64) + 3.01).abs() < 0.05);
        assert!(c.magnitude_db(15000.0, SR as f64).abs() < 0.05);
        assert!(c.magnitude_db(100.0, SR as f64) < -35.0);
    }

    #[test]
    fn test_highpass_dc_hits_floor() {
        let c = highpass_coefficients(1000.0, 0.707, SR);
        let db = c.magnitude_db(0.0, SR as f64);
        assert!(db.is_finite());
        assert!(db <= -200.0, "DC through a high-pass should vanish, got {db}");
    }

    #[test]
    fn test_peaking_center_gain() {
        let boost = peaking_eq_coefficients(1000.0, 1.0, 6.0, SR);
        assert!((boost.magnitude_db(1000.0, SR as f64) - 6.0).abs() < 0.01);
        assert!(boost.magnitude_db(20.0, SR as f64).abs() < 0.1);

        let cut = peaking_eq_coefficients(1000.0, 1.0, -6.0, SR);
        assert!((cut.magnitude_db(1000.0, SR as f64) + 6.0).abs() < 0.01);
    }

    #[test]
    fn test_peaking_eq_unity_at_zero_gain() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(peaking_eq_coefficients(1000.0, 1.0, 0.0, SR));

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }

        assert!((output - 1.0).abs() < 0.05, "DC should pass at 0dB gain, got {}", output);
    }

    #[test]
    fn test_biquad_lowpass_dc_pass() {
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(1000.0, 0.707, SR));

        let mut output = 0.0;
        for _ in 0..1000 {
            output = biquad.process(1.0);
        }

        assert!((output - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_unstable_coefficients_detected() {
        let c = BiquadCoefficients {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 1.5,
        };
        assert!(!c.is_stable());
        let nan = BiquadCoefficients { b0: f64::NAN, ..c };
        assert!(!nan.is_finite());
    }

    #[test]
    fn test_low_corner_holds_at_high_sample_rate() {
        let sr = 384_000.0;
        let q = core::f32::consts::FRAC_1_SQRT_2;

        let hp = highpass_coefficients(20.0, q, sr);
        assert!(hp.is_stable());
        let corner = hp.magnitude_db(20.0, sr as f64);
        assert!((corner + 3.01).abs() < 0.05, "high-pass corner {corner}");

        let lp = lowpass_coefficients(20.0, q, sr);
        assert!(lp.is_stable());
        let passband = lp.magnitude_db(2.0, sr as f64);
        assert!(passband.abs() < 0.05, "low-pass passband {passband}");
        let corner = lp.magnitude_db(20.0, sr as f64);
        assert!((corner + 3.01).abs() < 0.05, "low-pass corner {corner}");
    }

    #[test]
    fn test_low_lowpass_settles_to_unity_at_high_sample_rate() {
        let sr = 192_000.0;
        let mut biquad = Biquad::new();
        biquad.set_coefficients(lowpass_coefficients(20.0, 0.707, sr));

        let mut output = 0.0;
        for _ in 0..(sr as usize) {
            output = biquad.process(1.0);
        }
        assert!((output - 1.0).abs() < 1e-3, "DC gain {output}");
    }
}
