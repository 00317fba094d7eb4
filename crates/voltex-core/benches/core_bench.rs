//! Criterion benchmarks for voltex-core DSP primitives
//!
//! Run with: cargo bench -p voltex-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use voltex_core::{
    Biquad, Lfo, LfoWaveform, RingBuffer, lowpass_coefficients, peaking_coefficients_bw,
};

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

fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("Biquad");

    let coeffs = lowpass_coefficients(1000.0, 0.707, SAMPLE_RATE);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut biquad = Biquad::new();
                biquad.set(coeffs);
                b.iter(|| {
                    for &sample in &input {
                        black_box(biquad.process(black_box(sample)));
                    }
                });
            },
        );
    }

    group.bench_function("peaking_coefficient_calc", |b| {
        b.iter(|| {
            black_box(peaking_coefficients_bw(
                black_box(1000.0),
                black_box(1.0),
                black_box(6.0),
                black_box(SAMPLE_RATE),
            ))
        });
    });

    group.finish();
}

fn bench_ring_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("RingBuffer");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("read_delayed_push", block_size),
            &block_size,
            |b, _| {
                let mut ring = RingBuffer::new(4800);
                b.iter(|| {
                    for &sample in &input {
                        let delayed = ring.read_delayed(black_box(240.5));
                        ring.push((sample + delayed.0 * 0.5, sample + delayed.1 * 0.5));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lfo");

    for waveform in [LfoWaveform::Sine, LfoWaveform::Triangle] {
        group.bench_function(format!("{waveform:?}_1024"), |b| {
            let mut lfo = Lfo::new(48000, waveform);
            b.iter(|| {
                for _ in 0..1024 {
                    black_box(lfo.next());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_biquad, bench_ring_buffer, bench_lfo);
criterion_main!(benches);
