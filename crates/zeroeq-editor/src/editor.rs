//! The refresh-tick consumer that turns parameter changes into curves.
//!
//! [`ResponseCurveEditor`] owns the [`ChangeSignal`] that parameter writes
//! mark. On each [`tick`](ResponseCurveEditor::tick) it consumes the signal
//! and, only if something changed, snapshots the parameters, rebuilds the
//! chain and curve as fresh values and publishes them as one
//! [`EditorFrame`].
//!
//! # Thread Safety
//!
//! - **Signal**: `AtomicBool` exchange, producers never wait.
//! - **Frame**: `ArcSwap::load()` for readers (paint, audio path), one
//!   `store` per rebuild. A reader always sees a complete frame.
//! - **Sample rate / layout**: atomics and `ArcSwap`, a change forces the
//!   next tick to rebuild.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use zeroeq_core::FilterChain;

use crate::change_signal::ChangeSignal;
use crate::param_store::{ListenerId, ParamStore};
use crate::response_curve::{CurveLayout, ResponseCurve};

/// Everything one rebuild produced, published together.
#[derive(Debug, Clone)]
pub struct EditorFrame {
    /// Chain built from the tick-time snapshot.
    pub chain: Arc<FilterChain>,
    /// Curve computed from `chain`.
    pub curve: ResponseCurve,
    /// Rebuild number; 0 is the frame built at construction.
    pub generation: u64,
}

/// Result of one refresh tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new frame was published and the redraw callback invoked.
    Rebuilt {
        /// Generation of the new frame.
        generation: u64,
    },
    /// Nothing changed; no work was done.
    Idle,
}

impl TickOutcome {
    /// `true` for [`TickOutcome::Rebuilt`].
    pub fn is_rebuilt(self) -> bool {
        matches!(self, TickOutcome::Rebuilt { .. })
    }
}

/// Callback run on the tick thread after each new frame is published.
pub type RedrawCallback = Box<dyn Fn(&EditorFrame) + Send + Sync>;

/// Consumer side of the parameter → curve pipeline.
pub struct ResponseCurveEditor {
    store: Arc<dyn ParamStore>,
    signal: Arc<ChangeSignal>,
    listener: ListenerId,
    sample_rate: AtomicU32,
    layout: ArcSwap<CurveLayout>,
    frame: ArcSwap<EditorFrame>,
    rebuilds: AtomicU64,
    on_redraw: Option<RedrawCallback>,
}

impl ResponseCurveEditor {
    /// Creates an editor reading from `store`.
    ///
    /// Subscribes a listener that marks this editor's signal on every write,
    /// and publishes an initial frame (generation 0) from the current values.
    /// The listener is removed again when the editor is dropped.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use zeroeq_core::EqParam;
    /// use zeroeq_editor::{AtomicParamStore, CurveLayout, ParamStore, ResponseCurveEditor, TickOutcome};
    ///
    /// let store = Arc::new(AtomicParamStore::new());
    /// let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::new(100, 50.0), 48000.0);
    ///
    /// assert_eq!(editor.tick(), TickOutcome::Idle);
    /// store.set(EqParam::PeakGain, 6.0);
    /// assert_eq!(editor.tick(), TickOutcome::Rebuilt { generation: 1 });
    /// ```
    pub fn new(store: Arc<dyn ParamStore>, layout: CurveLayout, sample_rate: f32) -> Self {
        let signal = Arc::new(ChangeSignal::new());
        let listener = {
            let signal = Arc::clone(&signal);
            store.subscribe(Arc::new(move |_, _| signal.notify()))
        };

        let chain = FilterChain::new(&store.snapshot(), sample_rate);
        let curve = ResponseCurve::compute(&chain, &layout);
        let frame = EditorFrame {
            chain: Arc::new(chain),
            curve,
            generation: 0,
        };

        Self {
            store,
            signal,
            listener,
            sample_rate: AtomicU32::new(sample_rate.to_bits()),
            layout: ArcSwap::from_pointee(layout),
            frame: ArcSwap::from_pointee(frame),
            rebuilds: AtomicU64::new(0),
            on_redraw: None,
        }
    }

    /// Sets the callback invoked after every rebuild.
    pub fn with_redraw(mut self, on_redraw: impl Fn(&EditorFrame) + Send + Sync + 'static) -> Self {
        self.on_redraw = Some(Box::new(on_redraw));
        self
    }

    /// Consumes the change signal and rebuilds if anything changed.
    ///
    /// Also rebuilds when the published chain was computed for a different
    /// sample rate than the current one. Values set between two ticks are
    /// collapsed: only those present at snapshot time are drawn.
    pub fn tick(&self) -> TickOutcome {
        let changed = self.signal.take();
        let sample_rate = self.sample_rate();
        let current = self.frame.load();
        let stale = current.chain.needs_rebuild(sample_rate);
        if !changed && !stale {
            return TickOutcome::Idle;
        }

        let settings = self.store.snapshot();
        let mut chain = *current.chain;
        chain.rebuild(&settings, sample_rate);
        let curve = ResponseCurve::compute(&chain, &self.layout.load());
        let generation = self.rebuilds.fetch_add(1, Ordering::Relaxed) + 1;

        let frame = Arc::new(EditorFrame {
            chain: Arc::new(chain),
            curve,
            generation,
        });
        self.frame.store(Arc::clone(&frame));
        tracing::debug!(generation, sample_rate, stale, "response curve rebuilt");

        if let Some(on_redraw) = &self.on_redraw {
            on_redraw(&frame);
        }
        TickOutcome::Rebuilt { generation }
    }

    /// Latest published frame.
    pub fn frame(&self) -> Arc<EditorFrame> {
        self.frame.load_full()
    }

    /// Latest published chain, for the audio path.
    pub fn chain(&self) -> Arc<FilterChain> {
        Arc::clone(&self.frame.load().chain)
    }

    /// Number of rebuilds performed by [`tick`](Self::tick).
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.load(Ordering::Relaxed)
    }

    /// Current host sample rate.
    pub fn sample_rate(&self) -> f32 {
        f32::from_bits(self.sample_rate.load(Ordering::Acquire))
    }

    /// Updates the host sample rate; the next tick rebuilds.
    pub fn set_sample_rate(&self, sample_rate: f32) {
        self.sample_rate.store(sample_rate.to_bits(), Ordering::Release);
    }

    /// Current plot geometry.
    pub fn layout(&self) -> CurveLayout {
        **self.layout.load()
    }

    /// Replaces the plot geometry (e.g. on resize); the next tick rebuilds.
    pub fn set_layout(&self, layout: CurveLayout) {
        self.layout.store(Arc::new(layout));
        self.signal.notify();
    }

    /// Forces a rebuild on the next tick.
    pub fn request_rebuild(&self) {
        self.signal.notify();
    }

    /// Parameter store this editor reads from.
    pub fn store(&self) -> &Arc<dyn ParamStore> {
        &self.store
    }

    /// The change signal parameter writes mark.
    pub fn signal(&self) -> &Arc<ChangeSignal> {
        &self.signal
    }
}

impl Drop for ResponseCurveEditor {
    fn drop(&mut self) {
        self.store.unsubscribe(self.listener);
    }
}

impl std::fmt::Debug for ResponseCurveEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCurveEditor")
            .field("sample_rate", &self.sample_rate())
            .field("layout", &self.layout())
            .field("generation", &self.frame.load().generation)
            .field("pending", &self.signal.is_pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_store::AtomicParamStore;
    use std::sync::atomic::AtomicUsize;
    use zeroeq_core::EqParam;

    fn editor() -> (Arc<AtomicParamStore>, ResponseCurveEditor) {
        let store = Arc::new(AtomicParamStore::new());
        let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::new(120, 60.0), 48000.0);
        (store, editor)
    }

    #[test]
    fn initial_frame_is_published() {
        let (_, editor) = editor();
        let frame = editor.frame();
        assert_eq!(frame.generation, 0);
        assert_eq!(frame.curve.points().len(), 120);
        assert_eq!(editor.rebuild_count(), 0);
        assert_eq!(editor.chain().sample_rate(), 48000.0);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let (_, editor) = editor();
        let before = editor.frame();
        assert_eq!(editor.tick(), TickOutcome::Idle);
        assert!(Arc::ptr_eq(&before, &editor.frame()));
    }

    #[test]
    fn writes_coalesce_into_one_rebuild() {
        let (store, editor) = editor();
        for gain in [1.0, 2.0, 3.0, 4.0, 5.0] {
            store.set(EqParam::PeakGain, gain);
        }
        assert_eq!(editor.tick(), TickOutcome::Rebuilt { generation: 1 });
        assert_eq!(editor.tick(), TickOutcome::Idle);
        assert_eq!(editor.rebuild_count(), 1);
        let chain = editor.chain();
        assert!((chain.magnitude_db_at(750.0) - 5.0).abs() < 0.05);
    }

    #[test]
    fn sample_rate_change_forces_rebuild() {
        let (_, editor) = editor();
        editor.set_sample_rate(96000.0);
        assert!(editor.tick().is_rebuilt());
        assert_eq!(editor.chain().sample_rate(), 96000.0);
        assert_eq!(editor.tick(), TickOutcome::Idle);
    }

    #[test]
    fn layout_change_forces_rebuild() {
        let (_, editor) = editor();
        editor.set_layout(CurveLayout::new(40, 20.0));
        assert!(editor.tick().is_rebuilt());
        assert_eq!(editor.frame().curve.points().len(), 40);
    }

    #[test]
    fn redraw_called_once_per_rebuild() {
        let store = Arc::new(AtomicParamStore::new());
        let redraws = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&redraws);
        let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::default(), 44100.0)
            .with_redraw(move |frame| {
                assert!(frame.generation > 0);
                counter.fetch_add(1, Ordering::Relaxed);
            });
        editor.tick();
        store.set(EqParam::LowCutSlope, 2.0);
        editor.tick();
        editor.tick();
        editor.request_rebuild();
        editor.tick();
        assert_eq!(redraws.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn dropping_editors_releases_their_listeners() {
        let store = Arc::new(AtomicParamStore::new());
        for _ in 0..100 {
            let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::new(8, 8.0), 48000.0);
            assert_eq!(store.listener_count(), 1);
            drop(editor);
        }
        assert_eq!(store.listener_count(), 0);

        let kept = ResponseCurveEditor::new(store.clone(), CurveLayout::new(8, 8.0), 48000.0);
        let dropped = ResponseCurveEditor::new(store.clone(), CurveLayout::new(8, 8.0), 48000.0);
        let orphan = Arc::clone(dropped.signal());
        drop(dropped);
        assert_eq!(store.listener_count(), 1);

        store.set(EqParam::PeakGain, 2.0);
        assert!(!orphan.is_pending());
        assert!(kept.tick().is_rebuilt());
    }
}
