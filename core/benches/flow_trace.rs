use criterion::{Criterion, criterion_group, criterion_main};
use pipeflow_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

/// Serpentine path through every cell of an odd-sized board, the longest trace the board allows.
fn serpentine(size: Coord) -> PlayEngine {
    assert!(size % 2 == 1, "serpentine must end on an eastward row");
    let last = size - 1;
    let mut inventory = Inventory::new();
    let mut route = Vec::new();
    for row in 0..size {
        let eastward = row % 2 == 0;
        for col in 0..size {
            let pipe = match (eastward, col) {
                _ if (row, col) == (0, 0) || (row, col) == (last, last) => continue,
                (true, 0) => PipeType::CornerTopRight,
                (true, c) if c == last => PipeType::CornerBottomLeft,
                (false, c) if c == last => PipeType::CornerTopLeft,
                (false, 0) => PipeType::CornerBottomRight,
                _ => PipeType::StraightHorizontal,
            };
            route.push((inventory.add(pipe), (row, col)));
        }
    }

    let moves = route.len() as CellCount;
    let mut engine = PlayEngine::new(Board::new(size).unwrap(), inventory, moves);
    for (id, coords) in route {
        engine.place(id, coords).unwrap();
    }
    assert!(engine.trace().is_connected());
    engine
}

fn bench_trace(c: &mut Criterion) {
    let engine = serpentine(9);
    c.bench_function("trace serpentine 9x9", |b| {
        b.iter(|| black_box(engine.trace()))
    });
    c.bench_function("hint serpentine 9x9", |b| b.iter(|| black_box(engine.hint())));
}

fn bench_generate(c: &mut Criterion) {
    let catalog = LevelCatalog::default();
    let hardest = catalog.levels().last().unwrap().clone();
    c.bench_function("generate legend level", |b| {
        let mut generator = RandomLevelGenerator::new(7);
        b.iter(|| black_box(generator.generate(&hardest).unwrap()))
    });
    c.bench_function("generate crowded board", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        b.iter(|| black_box(Board::generate(16, 200, &mut rng).unwrap()))
    });
}

criterion_group!(benches, bench_trace, bench_generate);
criterion_main!(benches);
