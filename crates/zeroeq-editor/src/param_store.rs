//! Thread-safe parameter storage with change subscriptions.
//!
//! [`ParamStore`] abstracts over where parameter values live, so the editor
//! works the same against the atomic store below or a host-owned parameter
//! tree. Producers (audio thread, automation, UI gestures) call `set`; the
//! refresh tick reads everything back through [`ParamStore::snapshot`].
//!
//! ```text
//! producers ──► ParamStore::set(param, value) ──► listeners (ChangeSignal::notify)
//!                        │
//!                 AtomicU32 per param
//!                        │
//! refresh tick ◄── ParamStore::snapshot() -> ChainSettings
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use zeroeq_core::{ChainSettings, EqParam, PARAM_COUNT, ParamDescriptor};

use crate::change_signal::ChangeSignal;

/// Callback invoked after every parameter write, with the stored value.
///
/// Listeners run on the writing thread, which may be the audio thread: they
/// must not block or allocate.
pub type ParamListener = Arc<dyn Fn(EqParam, f32) + Send + Sync>;

/// Handle returned by [`ParamStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Trait for reading and writing equalizer parameters from any thread.
///
/// Implementations must be thread-safe: `get`, `set` and `snapshot` may be
/// called from different threads simultaneously.
pub trait ParamStore: Send + Sync {
    /// Number of parameters.
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Descriptor for display and validation.
    fn descriptor(&self, param: EqParam) -> ParamDescriptor {
        param.descriptor()
    }

    /// Current value of `param` in descriptor units.
    fn get(&self, param: EqParam) -> f32;

    /// Writes `param`, clamped to its descriptor range, and notifies listeners.
    fn set(&self, param: EqParam, value: f32);

    /// Registers a listener called after every `set`.
    fn subscribe(&self, listener: ParamListener) -> ListenerId;

    /// Removes a listener. Returns `false` if `id` was not registered.
    ///
    /// A `set` already walking the old list may still call it once.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Reads every parameter into an immutable snapshot.
    ///
    /// Each value is read atomically; the snapshot as a whole is not. A
    /// write racing the snapshot is picked up by the next tick because its
    /// notification lands after the value.
    fn snapshot(&self) -> ChainSettings {
        ChainSettings::from_fn(|param| self.get(param))
    }

    /// Writes `param` from a normalized `[0, 1]` position.
    fn set_normalized(&self, param: EqParam, normalized: f32) {
        let desc = self.descriptor(param);
        self.set(param, desc.denormalize(normalized.clamp(0.0, 1.0)));
    }

    /// Writes every parameter from `settings`.
    fn apply(&self, settings: &ChainSettings) {
        for param in EqParam::ALL {
            self.set(param, settings.get(param));
        }
    }
}

/// Parameter store backed by one `AtomicU32` (f32 bits) per parameter.
///
/// Writes are a clamp, a `Release` store and a walk over the listener list.
/// The list is published through `ArcSwap`, so `set` takes no lock and
/// does not allocate.
pub struct AtomicParamStore {
    values: [AtomicU32; PARAM_COUNT],
    listeners: ArcSwap<Vec<(ListenerId, ParamListener)>>,
    next_listener: AtomicU64,
}

impl AtomicParamStore {
    /// Store holding every parameter's default.
    pub fn new() -> Self {
        Self::from_settings(&ChainSettings::default())
    }

    /// Store initialized from `settings`.
    pub fn from_settings(settings: &ChainSettings) -> Self {
        Self {
            values: core::array::from_fn(|i| {
                let value = EqParam::from_index(i).map_or(0.0, |p| settings.get(p));
                AtomicU32::new(value.to_bits())
            }),
            listeners: ArcSwap::from_pointee(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.load().len()
    }

    /// Subscribes `signal` so every write marks it.
    pub fn connect(&self, signal: &Arc<ChangeSignal>) -> ListenerId {
        let signal = Arc::clone(signal);
        self.subscribe(Arc::new(move |_, _| signal.notify()))
    }
}

impl Default for AtomicParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AtomicParamStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicParamStore")
            .field("values", &self.snapshot().values())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ParamStore for AtomicParamStore {
    fn get(&self, param: EqParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Acquire))
    }

    fn set(&self, param: EqParam, value: f32) {
        let clamped = param.descriptor().clamp(value);
        self.values[param.index()].store(clamped.to_bits(), Ordering::Release);
        for (_, listener) in self.listeners.load().iter() {
            listener(param, clamped);
        }
    }

    fn subscribe(&self, listener: ParamListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push((id, Arc::clone(&listener)));
            next
        });
        tracing::trace!(count = self.listener_count(), "parameter listener registered");
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let previous = self.listeners.rcu(|current| {
            current
                .iter()
                .filter(|(registered, _)| *registered != id)
                .cloned()
                .collect::<Vec<_>>()
        });
        let removed = previous.iter().any(|(registered, _)| *registered == id);
        if removed {
            tracing::trace!(count = self.listener_count(), "parameter listener removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn defaults_match_descriptors() {
        let store = AtomicParamStore::new();
        for param in EqParam::ALL {
            assert_eq!(store.get(param), param.descriptor().default, "{param}");
        }
        assert_eq!(store.param_count(), PARAM_COUNT);
    }

    #[test]
    fn set_clamps_and_stores() {
        let store = AtomicParamStore::new();
        store.set(EqParam::PeakGain, 99.0);
        assert_eq!(store.get(EqParam::PeakGain), 24.0);
        store.set(EqParam::PeakQuality, -3.0);
        assert_eq!(store.get(EqParam::PeakQuality), 0.1);
        store.set(EqParam::LowCutSlope, 1.7);
        assert_eq!(store.get(EqParam::LowCutSlope), 2.0);
    }

    #[test]
    fn listeners_see_clamped_values() {
        let store = AtomicParamStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(AtomicU32::new(0));
        {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            store.subscribe(Arc::new(move |param, value| {
                assert_eq!(param, EqParam::PeakFreq);
                seen.store(value.to_bits(), Ordering::Relaxed);
                calls.fetch_add(1, Ordering::Relaxed);
            }));
        }
        store.set(EqParam::PeakFreq, 1.0);
        store.set(EqParam::PeakFreq, 1e9);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(f32::from_bits(seen.load(Ordering::Relaxed)), 20000.0);
    }

    #[test]
    fn connect_marks_signal() {
        let store = AtomicParamStore::new();
        let signal = Arc::new(ChangeSignal::new());
        store.connect(&signal);
        assert_eq!(store.listener_count(), 1);
        assert!(!signal.is_pending());
        store.set(EqParam::HighCutSlope, 3.0);
        assert!(signal.take());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = AtomicParamStore::new();
        let first = Arc::new(ChangeSignal::new());
        let second = Arc::new(ChangeSignal::new());
        let first_id = store.connect(&first);
        let second_id = store.connect(&second);
        assert_ne!(first_id, second_id);
        assert_eq!(store.listener_count(), 2);

        assert!(store.unsubscribe(first_id));
        assert!(!store.unsubscribe(first_id));
        assert_eq!(store.listener_count(), 1);

        store.set(EqParam::PeakGain, 3.0);
        assert!(!first.is_pending());
        assert!(second.take());

        assert!(store.unsubscribe(second_id));
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn snapshot_and_apply() {
        let store = AtomicParamStore::new();
        let settings = ChainSettings::default()
            .with(EqParam::PeakGain, -4.5)
            .with(EqParam::HighCutBypassed, 1.0);
        store.apply(&settings);
        assert_eq!(store.snapshot(), settings);
    }

    #[test]
    fn set_normalized_uses_log_scale_for_frequency() {
        let store = AtomicParamStore::new();
        store.set_normalized(EqParam::PeakFreq, 0.0);
        assert_eq!(store.get(EqParam::PeakFreq), 20.0);
        store.set_normalized(EqParam::PeakFreq, 0.5);
        assert!((store.get(EqParam::PeakFreq) - 632.455).abs() < 0.1);
        store.set_normalized(EqParam::PeakGain, 2.0);
        assert_eq!(store.get(EqParam::PeakGain), 24.0);
    }
}
