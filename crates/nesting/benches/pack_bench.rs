//! Criterion benchmarks for the single-bin packer.
//! Focus sizes: piece counts in {5, 20, 50}, comparing the greedy and
//! genetic strategies.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nesting::geom::{rectangle, Point};
use nesting::options::{NestOptions, Strategy};
use nesting::pack::pack;
use nesting::piece::Piece;

fn square_piece(id: &str, side: f64, quantity: u32) -> Piece {
    Piece {
        id: id.to_string(),
        polygon: {
            let r = rectangle(Point::new(0.0, 0.0), side, side);
            r
        },
        quantity,
    }
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for &n in &[5u32, 20, 50] {
        group.bench_with_input(BenchmarkId::new("bottom_left", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let pieces = vec![square_piece("p", 10.0, n)];
                    let opts = NestOptions::default();
                    (pieces, opts)
                },
                |(pieces, opts)| {
                    let _result = pack(&pieces, 500.0, 500.0, &opts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("genetic", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let pieces = vec![square_piece("p", 10.0, n)];
                    let opts = NestOptions {
                        strategy: Strategy::Genetic,
                        seed: 7,
                        ..Default::default()
                    };
                    (pieces, opts)
                },
                |(pieces, opts)| {
                    let _result = pack(&pieces, 500.0, 500.0, &opts);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
