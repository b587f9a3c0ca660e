//! Per-sample audio path for a [`FilterChain`].

use crate::biquad::Biquad;
use crate::chain::{CHAIN_SLOTS, FilterChain};

/// Nine stateful biquads running a chain's coefficients in series.
///
/// Coefficients are copied in by [`apply`](Self::apply); the delay lines
/// survive coefficient changes. Single channel: run one processor per
/// channel.
///
/// # Example
///
/// ```rust
/// use zeroeq_core::{ChainProcessor, ChainSettings, FilterChain};
///
/// let chain = FilterChain::new(&ChainSettings::default(), 48000.0);
/// let mut processor = ChainProcessor::new();
/// processor.apply(&chain);
///
/// let mut block = [0.5_f32; 64];
/// processor.process_block_inplace(&mut block);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChainProcessor {
    sections: [Biquad; CHAIN_SLOTS],
}

impl ChainProcessor {
    /// Processor with pass-through sections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the coefficients of every stage of `chain`.
    pub fn apply(&mut self, chain: &FilterChain) {
        for (section, stage) in self.sections.iter_mut().zip(chain.stages()) {
            section.set_coefficients(*stage.coefficients());
        }
    }

    /// Runs one sample through all nine sections.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.sections
            .iter_mut()
            .fold(input, |sample, section| section.process(sample))
    }

    /// Processes a block in place.
    pub fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clears all delay lines.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }
}
