//! Cut-filter slope selection and Butterworth cascade tables.
//!
//! A slope ordinal `k` (0–3) selects `k + 1` cascaded second-order sections,
//! i.e. a Butterworth filter of order `2(k + 1)` falling at `12(k + 1)`
//! dB/octave. Repeating a 0.707-Q section would sag at the cutoff, so each
//! section gets its own Q from the Butterworth pole angles.

use libm::sinf;

/// Maximum number of second-order sections in a cut bank.
pub const MAX_SECTIONS: usize = 4;

/// Attenuation slope of a cut filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    /// One section, 12 dB/octave.
    #[default]
    Db12,
    /// Two sections, 24 dB/octave.
    Db24,
    /// Three sections, 36 dB/octave.
    Db36,
    /// Four sections, 48 dB/octave.
    Db48,
}

impl Slope {
    /// All slopes in ordinal order.
    pub const ALL: [Slope; MAX_SECTIONS] = [Slope::Db12, Slope::Db24, Slope::Db36, Slope::Db48];

    /// Slope from a stored parameter value.
    ///
    /// Rounds to the nearest ordinal and clamps into 0–3; NaN maps to
    /// [`Slope::Db12`].
    ///
    /// ```rust
    /// use zeroeq_core::Slope;
    ///
    /// assert_eq!(Slope::from_ordinal(2.0), Slope::Db36);
    /// assert_eq!(Slope::from_ordinal(2.6), Slope::Db48);
    /// assert_eq!(Slope::from_ordinal(-1.0), Slope::Db12);
    /// assert_eq!(Slope::from_ordinal(9.0), Slope::Db48);
    /// ```
    pub fn from_ordinal(value: f32) -> Self {
        if value.is_nan() {
            return Slope::Db12;
        }
        let index = libm::roundf(value.clamp(0.0, 3.0)) as usize;
        Self::ALL[index.min(MAX_SECTIONS - 1)]
    }

    /// Parameter ordinal (0–3).
    #[inline]
    pub const fn ordinal(self) -> usize {
        match self {
            Slope::Db12 => 0,
            Slope::Db24 => 1,
            Slope::Db36 => 2,
            Slope::Db48 => 3,
        }
    }

    /// Number of active second-order sections (1–4).
    #[inline]
    pub const fn order(self) -> usize {
        self.ordinal() + 1
    }

    /// Attenuation in dB per octave: `12 + ordinal * 12`.
    #[inline]
    pub const fn db_per_octave(self) -> u32 {
        12 + self.ordinal() as u32 * 12
    }

    /// Display label, e.g. `"24 dB/Oct"`.
    pub const fn label(self) -> &'static str {
        match self {
            Slope::Db12 => "12 dB/Oct",
            Slope::Db24 => "24 dB/Oct",
            Slope::Db36 => "36 dB/Oct",
            Slope::Db48 => "48 dB/Oct",
        }
    }
}

impl core::fmt::Display for Slope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Q of section `section` (0-based) in an `order`-section Butterworth cascade.
///
/// The cascade of `order` sections is a Butterworth filter of degree
/// `n = 2 * order`; section `k = section + 1` takes the pole pair at angle
/// `pi * (2k - 1) / (2n)`, giving `Q_k = 1 / (2 sin(angle))`.
///
/// | order | section Qs                         |
/// |-------|------------------------------------|
/// | 1     | 0.7071                             |
/// | 2     | 1.3066, 0.5412                     |
/// | 3     | 1.9319, 0.7071, 0.5176             |
/// | 4     | 2.5629, 0.9000, 0.6013, 0.5098     |
///
/// Out-of-range arguments are clamped: `order` into 1–4 and `section`
/// below `order`.
pub fn butterworth_section_q(section: usize, order: usize) -> f32 {
    let order = order.clamp(1, MAX_SECTIONS);
    let k = section.min(order - 1) + 1;
    let degree = (2 * order) as f32;
    let angle = core::f32::consts::PI * (2 * k - 1) as f32 / (2.0 * degree);
    1.0 / (2.0 * sinf(angle))
}
