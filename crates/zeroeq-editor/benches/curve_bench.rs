//! Criterion benchmarks for zeroeq-editor
//!
//! Run with: cargo bench -p zeroeq-editor
#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use zeroeq_core::{ChainSettings, EqParam, FilterChain};
use zeroeq_editor::{AtomicParamStore, CurveLayout, ParamStore, ResponseCurve, ResponseCurveEditor};

const WIDTHS: &[usize] = &[256, 512, 1024, 2048];

fn bench_curve_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("ResponseCurve");
    let settings = ChainSettings::default()
        .with(EqParam::LowCutSlope, 3.0)
        .with(EqParam::HighCutSlope, 3.0)
        .with(EqParam::PeakGain, 6.0);
    let chain = FilterChain::new(&settings, 48000.0);

    for &width in WIDTHS {
        let layout = CurveLayout::new(width, 200.0);
        group.bench_with_input(BenchmarkId::new("compute", width), &layout, |b, layout| {
            b.iter(|| black_box(ResponseCurve::compute(black_box(&chain), layout)));
        });
    }

    group.finish();
}

fn bench_param_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("AtomicParamStore");
    let store = Arc::new(AtomicParamStore::new());
    let _editor = ResponseCurveEditor::new(store.clone(), CurveLayout::default(), 48000.0);

    group.bench_function("set_with_listener", |b| {
        let mut gain = 0.0f32;
        b.iter(|| {
            gain = (gain + 0.5) % 24.0;
            store.set(EqParam::PeakGain, black_box(gain));
        });
    });

    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(store.snapshot()));
    });

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let store = Arc::new(AtomicParamStore::new());
    let editor = ResponseCurveEditor::new(store.clone(), CurveLayout::new(600, 200.0), 48000.0);

    c.bench_function("editor_tick_rebuild", |b| {
        b.iter(|| {
            store.set(EqParam::PeakFreq, 1000.0);
            black_box(editor.tick())
        });
    });

    c.bench_function("editor_tick_idle", |b| {
        b.iter(|| black_box(editor.tick()));
    });
}

criterion_group!(benches, bench_curve_compute, bench_param_store, bench_tick);

criterion_main!(benches);
