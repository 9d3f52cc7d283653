//! Criterion benchmarks for propagation chains in both modes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gatesim_bench::{buffer_chain, fan_out};
use gatesim_engine::BoardConfig;

fn recursive_config(n: usize) -> BoardConfig {
    BoardConfig {
        max_depth: n + 16,
        ..BoardConfig::default()
    }
}

fn bench_buffer_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_chain");
    for n in [64usize, 512] {
        let configs = [
            ("recursive", recursive_config(n)),
            ("queued", BoardConfig::queued()),
        ];
        for (label, config) in configs {
            let mut profile = buffer_chain(config, n).unwrap();
            let mut level = false;
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| {
                    level = !level;
                    let stats = profile.board.set_socket_state(profile.input, level).unwrap();
                    black_box(&stats);
                });
            });
        }
    }
    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");
    for n in [16usize, 256] {
        for (label, config) in [
            ("recursive", BoardConfig::default()),
            ("queued", BoardConfig::queued()),
        ] {
            let mut profile = fan_out(config, n).unwrap();
            let mut level = false;
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| {
                    level = !level;
                    let stats = profile.board.set_socket_state(profile.input, level).unwrap();
                    black_box(&stats);
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_buffer_chain, bench_fan_out);
criterion_main!(benches);
