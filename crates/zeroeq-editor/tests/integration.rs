//! Integration tests for zeroeq-editor.
//!
//! Exercises the producer → signal → tick → frame pipeline across threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use zeroeq_core::{ChainProcessor, EqParam};
use zeroeq_editor::{
    AtomicParamStore, CurveLayout, EguiCurveSink, ParamStore, RefreshTimer, ResponseCurveEditor,
    TickOutcome,
};

fn setup(sample_rate: f32) -> (Arc<AtomicParamStore>, Arc<ResponseCurveEditor>) {
    let store = Arc::new(AtomicParamStore::new());
    let editor = Arc::new(ResponseCurveEditor::new(
        store.clone(),
        CurveLayout::new(300, 100.0),
        sample_rate,
    ));
    (store, editor)
}

#[test]
fn concurrent_writers_produce_one_rebuild_per_tick() {
    let (store, editor) = setup(48000.0);

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    store.set(EqParam::PeakGain, ((w * 500 + i) % 48) as f32 - 24.0);
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    // final, tick-time value
    store.set(EqParam::PeakGain, 7.5);

    assert_eq!(editor.tick(), TickOutcome::Rebuilt { generation: 1 });
    assert_eq!(editor.tick(), TickOutcome::Idle);
    assert_eq!(editor.rebuild_count(), 1);
    assert!((editor.chain().magnitude_db_at(750.0) - 7.5).abs() < 0.05);
}

#[test]
fn frame_is_always_consistent_for_readers() {
    let (store, editor) = setup(48000.0);
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let reader = {
        let editor = Arc::clone(&editor);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut checked = 0u64;
            while !stop.load(Ordering::Relaxed) {
                let frame = editor.frame();
                // the curve must describe the chain it was published with
                if let Some(first) = frame.curve.points().first() {
                    let expected = frame.chain.magnitude_db_at(f64::from(first.freq_hz));
                    assert_eq!(first.magnitude_db, expected);
                }
                checked += 1;
            }
            checked
        })
    };

    for i in 0..200 {
        store.set(EqParam::LowCutFreq, 20.0 + i as f32 * 10.0);
        store.set(EqParam::LowCutSlope, (i % 4) as f32);
        editor.tick();
    }
    stop.store(true, Ordering::Relaxed);
    assert!(reader.join().unwrap() > 0);
    assert_eq!(editor.rebuild_count(), 200);
}

#[test]
fn sample_rate_change_without_parameter_change() {
    let (_, editor) = setup(44100.0);
    assert_eq!(editor.tick(), TickOutcome::Idle);
    editor.set_sample_rate(48000.0);
    assert!(editor.tick().is_rebuilt());
    assert!(!editor.chain().needs_rebuild(48000.0));
    assert!(editor.chain().stages().all(|s| s.sample_rate() == 48000.0));
}

#[test]
fn timer_drives_rebuilds() {
    let store = Arc::new(AtomicParamStore::new());
    let redraws = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&redraws);
    let editor = Arc::new(
        ResponseCurveEditor::new(store.clone(), CurveLayout::default(), 48000.0).with_redraw(
            move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
            },
        ),
    );
    let timer = RefreshTimer::for_editor(Arc::clone(&editor), 100.0).unwrap();

    store.set(EqParam::HighCutFreq, 5000.0);
    let deadline = Instant::now() + Duration::from_secs(5);
    while editor.rebuild_count() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    let ticks = timer.stop();

    assert!(ticks > 0);
    assert_eq!(editor.rebuild_count(), 1);
    assert_eq!(redraws.load(Ordering::Relaxed), 1);
    assert!(editor.chain().magnitude_db_at(10000.0) < -10.0);
}

#[test]
fn audio_path_follows_published_chain() {
    let (store, editor) = setup(48000.0);
    store.set(EqParam::LowCutFreq, 200.0);
    store.set(EqParam::LowCutSlope, 3.0);
    editor.tick();

    let mut processor = ChainProcessor::new();
    processor.apply(&editor.chain());
    let mut last = 0.0;
    for _ in 0..48000 {
        last = processor.process(1.0);
    }
    assert!(last.abs() < 1e-3);
}

#[test]
fn curve_renders_into_egui_rect() {
    let (store, editor) = setup(48000.0);
    store.set(EqParam::PeakGain, 12.0);
    editor.tick();

    let rect = egui::Rect::from_min_size(egui::pos2(50.0, 50.0), egui::vec2(300.0, 100.0));
    let mut sink = EguiCurveSink::new(rect, egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE));
    editor.frame().curve.render_to(&mut sink);

    let shapes = sink.into_shapes();
    assert_eq!(shapes.len(), 1);
    let bounds = shapes[0].visual_bounding_rect();
    assert!(rect.expand(1.0).contains_rect(bounds), "{bounds:?}");
}
