//! Single-flag change notification between producer threads and the UI tick.

use std::sync::atomic::{AtomicBool, Ordering};

/// A coalescing "something changed" flag.
///
/// Any thread may [`notify`](Self::notify); one consumer calls
/// [`take`](Self::take) once per refresh tick. However many notifications
/// arrive between two ticks, the consumer sees exactly one `true`.
/// Which values changed, and how often, is not recorded.
///
/// ```rust
/// use zeroeq_editor::ChangeSignal;
///
/// let signal = ChangeSignal::new();
/// signal.notify();
/// signal.notify();
/// assert!(signal.take());
/// assert!(!signal.take());
/// ```
#[derive(Debug, Default)]
pub struct ChangeSignal {
    pending: AtomicBool,
}

impl ChangeSignal {
    /// Creates a cleared signal.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Marks a change. Wait-free; safe on the audio thread.
    #[inline]
    pub fn notify(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Returns `true` if a change was marked since the last call, and clears it.
    ///
    /// Values written before the matching `notify` are visible to the caller.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Peeks at the flag without consuming it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_clear() {
        let signal = ChangeSignal::default();
        assert!(!signal.is_pending());
        assert!(!signal.take());
    }

    #[test]
    fn peek_does_not_consume() {
        let signal = ChangeSignal::new();
        signal.notify();
        assert!(signal.is_pending());
        assert!(signal.is_pending());
        assert!(signal.take());
        assert!(!signal.is_pending());
    }

    #[test]
    fn concurrent_notifies_coalesce() {
        let signal = Arc::new(ChangeSignal::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let signal = Arc::clone(&signal);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        signal.notify();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(signal.take());
        assert!(!signal.take());
    }
}
