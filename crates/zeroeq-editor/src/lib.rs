//! ZeroEQ Editor - parameter synchronization and response-curve display
//!
//! Connects parameter writes on any thread to a periodically refreshed
//! frequency-response curve:
//!
//! ```text
//! ParamStore::set ─► ChangeSignal::notify
//!                          │
//! RefreshTimer ─► ResponseCurveEditor::tick ─► snapshot ─► FilterChain ─► ResponseCurve
//!                                                                              │
//!                                              EditorFrame (ArcSwap) ◄─────────┘
//!                                                  │
//!                                  paint (CurveSink) / audio path (chain())
//! ```
//!
//! # Modules
//!
//! - [`param_store`] - [`ParamStore`] trait and the lock-free [`AtomicParamStore`]
//! - [`change_signal`] - Coalescing [`ChangeSignal`]
//! - [`response_curve`] - [`CurveLayout`] and [`ResponseCurve`]
//! - [`editor`] - [`ResponseCurveEditor`], the tick consumer
//! - [`timer`] - [`RefreshTimer`] background thread
//! - [`sink`] - [`CurveSink`] rendering seam and [`EguiCurveSink`]
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use zeroeq_core::EqParam;
//! use zeroeq_editor::{AtomicParamStore, CurveLayout, ParamStore, ResponseCurveEditor};
//!
//! let store = Arc::new(AtomicParamStore::new());
//! let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::new(256, 120.0), 48000.0);
//!
//! store.set(EqParam::PeakFreq, 1000.0);
//! store.set(EqParam::PeakGain, 6.0);
//! editor.tick();
//!
//! let frame = editor.frame();
//! let peak = frame.curve.peak_point().unwrap();
//! assert!((peak.magnitude_db - 6.0).abs() < 0.1);
//! ```

pub mod change_signal;
pub mod editor;
pub mod param_store;
pub mod response_curve;
pub mod sink;
pub mod timer;

pub use change_signal::ChangeSignal;
pub use editor::{EditorFrame, RedrawCallback, ResponseCurveEditor, TickOutcome};
pub use param_store::{AtomicParamStore, ListenerId, ParamListener, ParamStore};
pub use response_curve::{CurveLayout, CurvePoint, ResponseCurve};
pub use sink::{CurveSink, EguiCurveSink};
pub use timer::{DEFAULT_REFRESH_HZ, RefreshTimer, refresh_interval};
