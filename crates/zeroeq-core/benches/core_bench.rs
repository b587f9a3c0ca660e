//! Criterion benchmarks for zeroeq-core
//!
//! Run with: cargo bench -p zeroeq-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use zeroeq_core::{ChainProcessor, ChainSettings, EqParam, FilterChain};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn steep_settings() -> ChainSettings {
    ChainSettings::default()
        .with(EqParam::LowCutFreq, 80.0)
        .with(EqParam::LowCutSlope, 3.0)
        .with(EqParam::HighCutFreq, 12000.0)
        .with(EqParam::HighCutSlope, 3.0)
        .with(EqParam::PeakGain, 4.5)
}

fn bench_chain_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("FilterChain");
    let settings = steep_settings();

    group.bench_function("rebuild", |b| {
        let mut chain = FilterChain::new(&ChainSettings::default(), SAMPLE_RATE);
        b.iter(|| chain.rebuild(black_box(&settings), black_box(SAMPLE_RATE)));
    });

    group.bench_function("magnitude_db_at", |b| {
        let chain = FilterChain::new(&settings, SAMPLE_RATE);
        b.iter(|| black_box(chain.magnitude_db_at(black_box(1234.5))));
    });

    group.finish();
}

fn bench_processor(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChainProcessor");
    let chain = FilterChain::new(&steep_settings(), SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process_block", block_size),
            &block_size,
            |b, _| {
                let mut processor = ChainProcessor::new();
                processor.apply(&chain);
                let mut buffer = input.clone();
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    processor.process_block_inplace(black_box(&mut buffer));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_chain_rebuild, bench_processor);

criterion_main!(benches);
