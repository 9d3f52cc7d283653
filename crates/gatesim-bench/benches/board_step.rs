//! Criterion benchmarks for per-tick polling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gatesim_bench::switch_bank;
use gatesim_core::PointerState;
use gatesim_engine::{Board, BoardConfig};
use gatesim_test_utils::fixtures::{click, nand_latch};

fn bench_idle_tick_256_switches(c: &mut Criterion) {
    let (mut board, _) = switch_bank(BoardConfig::default(), 256).unwrap();
    let mut pointer = PointerState::default();

    // Warm up: one tick so every source has seen a sample.
    board.step(&mut pointer).unwrap();

    c.bench_function("idle_tick_256_switches", |b| {
        b.iter(|| {
            let metrics = board.step(&mut pointer).unwrap();
            black_box(&metrics);
        });
    });
}

fn bench_latch_toggle(c: &mut Criterion) {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    let latch = nand_latch(&mut board);

    c.bench_function("nand_latch_click", |b| {
        b.iter(|| {
            click(&mut board, latch.switch1);
            black_box(latch.outputs(&board));
        });
    });
}

criterion_group!(benches, bench_idle_tick_256_switches, bench_latch_toggle);
criterion_main!(benches);
