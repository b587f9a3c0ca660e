//! Concurrency simulation: producer threads writing parameters while the
//! refresh timer rebuilds the curve.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Args;
use zeroeq_core::EqParam;
use zeroeq_editor::{AtomicParamStore, ParamStore, RefreshTimer, ResponseCurveEditor};

use super::common::ConfigArgs;

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of producer threads
    #[arg(short, long, default_value_t = 4)]
    producers: usize,

    /// How long producers keep writing, in milliseconds
    #[arg(short, long, default_value_t = 500)]
    duration_ms: u64,

    /// Maximum writes per producer (unlimited if omitted)
    #[arg(short, long)]
    edits: Option<u64>,

    /// Refresh rate in Hz, overriding the configuration
    #[arg(long)]
    refresh_hz: Option<f32>,

    #[command(flatten)]
    config: ConfigArgs,
}

/// Per-thread xorshift32 generator.
struct XorShift32(u32);

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32) / (u32::MAX as f32)
    }
}

/// Writes random normalized values round-robin across all parameters.
fn produce(store: &dyn ParamStore, seed: u32, max_edits: Option<u64>, stop: &AtomicBool) -> u64 {
    let mut rng = XorShift32::new(seed);
    let mut edits = 0u64;
    while !stop.load(Ordering::Relaxed) && max_edits.is_none_or(|max| edits < max) {
        let param = EqParam::ALL[(edits as usize) % EqParam::ALL.len()];
        store.set_normalized(param, rng.next_f32());
        edits += 1;
        if edits % 64 == 0 {
            thread::yield_now();
        }
    }
    edits
}

pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let mut config = args.config.load()?;
    if let Some(refresh_hz) = args.refresh_hz {
        config.refresh_hz = refresh_hz;
    }
    config.validate()?;
    anyhow::ensure!(args.producers > 0, "at least one producer is required");

    let store = Arc::new(AtomicParamStore::new());
    let editor = Arc::new(ResponseCurveEditor::new(
        store.clone(),
        config.curve_layout(),
        config.sample_rate,
    ));
    let timer = RefreshTimer::for_editor(Arc::clone(&editor), config.refresh_hz)
        .context("starting refresh timer")?;

    tracing::info!(
        producers = args.producers,
        duration_ms = args.duration_ms,
        refresh_hz = config.refresh_hz,
        "simulation started"
    );

    let stop = Arc::new(AtomicBool::new(false));
    let started = Instant::now();
    let producers = (0..args.producers)
        .map(|i| {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            let max_edits = args.edits;
            thread::Builder::new()
                .name(format!("zeroeq-producer-{i}"))
                .spawn(move || produce(store.as_ref(), 0x1234_5678 ^ (i as u32 + 1), max_edits, &stop))
                .context("spawning producer thread")
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let deadline = started + Duration::from_millis(args.duration_ms);
    while Instant::now() < deadline && !producers.iter().all(|p| p.is_finished()) {
        thread::sleep(Duration::from_millis(1));
    }
    stop.store(true, Ordering::Relaxed);

    let mut edits = 0u64;
    for producer in producers {
        edits += producer
            .join()
            .map_err(|_| anyhow::anyhow!("producer thread panicked"))?;
    }
    let elapsed = started.elapsed();
    let ticks = timer.stop();

    // pick up writes that landed after the last timer tick
    let flushed = editor.tick().is_rebuilt();
    let rebuilds = editor.rebuild_count();
    let frame = editor.frame();

    println!("Simulation");
    println!("==========");
    println!();
    println!("  Producers:        {}", args.producers);
    println!("  Elapsed:          {:.1} ms", elapsed.as_secs_f64() * 1000.0);
    println!("  Parameter writes: {edits}");
    println!("  Timer ticks:      {ticks}");
    println!("  Curve rebuilds:   {rebuilds}{}", if flushed { " (1 on final flush)" } else { "" });
    if rebuilds > 0 {
        println!("  Writes/rebuild:   {:.1}", edits as f64 / rebuilds as f64);
    }
    println!("  Final generation: {}", frame.generation);
    if let Some(peak) = frame.curve.peak_point() {
        println!(
            "  Final peak:       {:+.2} dB at {:.0} Hz",
            peak.magnitude_db, peak.freq_hz
        );
    }

    // the published frame must reflect the final parameter values
    let expected = zeroeq_core::FilterChain::new(&store.snapshot(), config.sample_rate);
    anyhow::ensure!(*frame.chain == expected, "published chain is stale");
    println!("  Final frame matches store: yes");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_stays_in_unit_range() {
        let mut rng = XorShift32::new(0);
        for _ in 0..1000 {
            let x = rng.next_f32();
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn produce_respects_edit_limit() {
        let store = AtomicParamStore::new();
        let stop = AtomicBool::new(false);
        assert_eq!(produce(&store, 7, Some(25), &stop), 25);
    }

    #[test]
    fn produce_stops_on_flag() {
        let store = AtomicParamStore::new();
        let stop = AtomicBool::new(true);
        assert_eq!(produce(&store, 7, None, &stop), 0);
    }
}
