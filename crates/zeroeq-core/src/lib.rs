//! ZeroEQ Core - filter-chain DSP for a three-band parametric equalizer
//!
//! This crate models the equalizer's signal path: a low-cut bank, a peak
//! (bell) stage and a high-cut bank, each designed from semantic parameters
//! and evaluated for both audio processing and response plotting.
//!
//! # Core Abstractions
//!
//! ## Stages and Banks
//!
//! - [`FilterStage`] - One biquad section (peak, cut section or identity)
//! - [`CutFilterBank`] - Four cut sections implementing a 12–48 dB/Oct slope
//! - [`Slope`] - Slope selection and Butterworth per-section Q
//!
//! ## Chain
//!
//! - [`FilterChain`] - Fixed nine-slot topology, rebuilt wholesale
//! - [`ChainSettings`] - Immutable snapshot of every parameter
//! - [`ChainProcessor`] - Stateful per-sample audio path
//!
//! ## Parameters
//!
//! - [`EqParam`] - The ten equalizer parameters and their descriptors
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Runtime introspection
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for display text).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! zeroeq-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use zeroeq_core::{ChainProcessor, ChainSettings, EqParam, FilterChain};
//!
//! let settings = ChainSettings::default()
//!     .with(EqParam::LowCutFreq, 80.0)
//!     .with(EqParam::LowCutSlope, 2.0)
//!     .with(EqParam::PeakGain, -3.0);
//!
//! let chain = FilterChain::new(&settings, 48000.0);
//! let mut processor = ChainProcessor::new();
//! processor.apply(&chain);
//!
//! let y = processor.process(0.5);
//! assert!(y.is_finite());
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in the processing path
//! - **Always stable**: Inputs are clamped and unstable designs fall back to identity
//! - **Whole values**: Chains and stages are rebuilt, never patched in place

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod chain;
pub mod cut_bank;
pub mod filter_stage;
pub mod math;
pub mod param_info;
pub mod processor;
pub mod settings;
pub mod slope;

// Re-export main types at crate root
pub use biquad::{
    Biquad, BiquadCoefficients, MAGNITUDE_FLOOR_DB, highpass_coefficients, lowpass_coefficients,
    peaking_eq_coefficients,
};
pub use chain::{CHAIN_SLOTS, FilterChain};
pub use cut_bank::CutFilterBank;
pub use filter_stage::{CutKind, FilterStage, PEAK_GAIN_RANGE, StageKind};
pub use math::{
    MAX_FREQUENCY, MAX_Q, MIN_FREQUENCY, MIN_Q, clamp_frequency, clamp_q, db_to_linear,
    linear_to_db, log_interpolate, log_position, map_range, nyquist_limit,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use processor::ChainProcessor;
pub use settings::{ChainSettings, EqParam, PARAM_COUNT};
pub use slope::{MAX_SECTIONS, Slope, butterworth_section_q};
