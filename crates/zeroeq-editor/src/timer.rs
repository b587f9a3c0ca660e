//! Periodic refresh thread driving [`ResponseCurveEditor::tick`].

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, bounded, select, tick};

use crate::editor::ResponseCurveEditor;

/// Default refresh rate, in ticks per second.
pub const DEFAULT_REFRESH_HZ: f32 = 30.0;

const MIN_REFRESH_HZ: f32 = 1.0;
const MAX_REFRESH_HZ: f32 = 240.0;

/// Tick period for `refresh_hz`, clamped to 1–240 Hz.
///
/// Non-finite or non-positive rates fall back to [`DEFAULT_REFRESH_HZ`].
pub fn refresh_interval(refresh_hz: f32) -> Duration {
    let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
        refresh_hz.clamp(MIN_REFRESH_HZ, MAX_REFRESH_HZ)
    } else {
        DEFAULT_REFRESH_HZ
    };
    Duration::from_secs_f32(1.0 / hz)
}

/// A named background thread calling a tick function at a fixed rate.
///
/// Stopping (explicitly or on drop) disconnects the stop channel and joins
/// the thread. A tick already running finishes first.
#[derive(Debug)]
pub struct RefreshTimer {
    interval: Duration,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl RefreshTimer {
    /// Spawns the timer thread, calling `on_tick` every `1 / refresh_hz` seconds.
    pub fn start<F>(refresh_hz: f32, mut on_tick: F) -> std::io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let interval = refresh_interval(refresh_hz);
        let (stop_tx, stop_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("zeroeq-refresh".into())
            .spawn(move || {
                let ticker = tick(interval);
                let mut ticks = 0u64;
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            on_tick();
                            ticks += 1;
                        }
                        recv(stop_rx) -> _ => break,
                    }
                }
                ticks
            })?;

        tracing::info!(interval_ms = interval.as_secs_f64() * 1000.0, "refresh timer started");
        Ok(Self {
            interval,
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Spawns a timer ticking `editor`.
    pub fn for_editor(editor: Arc<ResponseCurveEditor>, refresh_hz: f32) -> std::io::Result<Self> {
        Self::start(refresh_hz, move || {
            editor.tick();
        })
    }

    /// Tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `true` until the timer is stopped.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and returns how many ticks it ran.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        // dropping the sender disconnects the stop channel
        drop(self.stop.take());
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        let ticks = handle.join().unwrap_or(0);
        tracing::info!(ticks, "refresh timer stopped");
        ticks
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
