//! Fixed-width cascade of Butterworth cut sections.

use crate::filter_stage::{CutKind, FilterStage};
use crate::slope::{MAX_SECTIONS, Slope};

/// Four cut stages, the first `slope.order()` of them active.
///
/// The bank always holds [`MAX_SECTIONS`] stages. Sections past the
/// selected order are identity stages, so low-cut and high-cut banks have
/// the same shape regardless of slope and a rebuild never reallocates.
///
/// # Example
///
/// ```rust
/// use zeroeq_core::{CutFilterBank, CutKind, Slope};
///
/// let bank = CutFilterBank::build(CutKind::LowCut, 80.0, Slope::Db24, 48000.0);
/// assert_eq!(bank.active_count(), 2);
/// assert!(bank.stages()[2].is_identity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutFilterBank {
    stages: [FilterStage; MAX_SECTIONS],
}

impl CutFilterBank {
    /// Builds a bank implementing a `slope.db_per_octave()` cut at `cutoff`.
    pub fn build(kind: CutKind, cutoff: f32, slope: Slope, sample_rate: f32) -> Self {
        let order = slope.order();
        let stages = core::array::from_fn(|section| {
            if section < order {
                FilterStage::cut(kind, cutoff, section, order, sample_rate)
            } else {
                FilterStage::identity(sample_rate)
            }
        });
        Self { stages }
    }

    /// A bank that passes everything through.
    pub fn bypassed(sample_rate: f32) -> Self {
        Self {
            stages: [FilterStage::identity(sample_rate); MAX_SECTIONS],
        }
    }

    /// The four stages in series order.
    #[inline]
    pub fn stages(&self) -> &[FilterStage; MAX_SECTIONS] {
        &self.stages
    }

    /// Number of non-identity stages.
    pub fn active_count(&self) -> usize {
        self.stages.iter().filter(|s| !s.is_identity()).count()
    }

    /// Combined magnitude of the bank in dB at `freq_hz`.
    pub fn magnitude_db(&self, freq_hz: f64) -> f64 {
        self.stages.iter().map(|s| s.magnitude_db(freq_hz)).sum()
    }
}
