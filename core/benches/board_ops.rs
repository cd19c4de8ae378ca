use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweep_core::*;

const TIERS: [(&str, Coord, Coord, CellCount); 4] = [
    ("beginner", 5, 5, 5),
    ("expert", 10, 10, 30),
    ("max", 18, 30, 99),
    ("dense", 18, 30, 500),
];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, rows, columns, bombs) in TIERS {
        let config = BoardConfig::new(rows, columns, bombs).unwrap();
        for placement in [Placement::Rejection, Placement::Shuffle] {
            group.bench_with_input(
                BenchmarkId::new(format!("{placement:?}"), name),
                &config,
                |b, &config| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        black_box(Board::with_placement(config, seed, placement))
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single bomb in the far corner leaves one huge blank region
    let layout = BombLayout::from_bomb_coords((18, 30), &[(17, 29)]).unwrap();
    let board = Board::from_layout(&layout, 0).unwrap();

    c.bench_function("flood_fill/open_board", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.reveal_tile(0, 0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_generation, bench_flood_fill);
criterion_main!(benches);
