use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minesweeper_core::*;

const TIERS: [(&str, GameConfig); 4] = [
    ("beginner", GameMode::Beginner.config()),
    ("intermediate", GameMode::Intermediate.config()),
    ("expert", GameMode::Expert.config()),
    ("max-dense", GameConfig::new_unchecked(50, 50, 833)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                let layout = RandomMineGenerator::new(seed, (0, 0))
                    .generate(black_box(config))
                    .unwrap();
                compute_adjacency(layout.mine_mask())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
