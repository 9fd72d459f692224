use criterion::{Criterion, criterion_group, criterion_main};
use minequest_core::{Board, GameConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let config = GameConfig::new((20, 20), 60, 70, 10);

    c.bench_function("generate_20x20", |b| {
        let mut rng = SmallRng::seed_from_u64(0xb0a7d);
        b.iter(|| {
            let board = Board::generate(black_box(config), &mut rng).expect("board should build");
            black_box(board)
        })
    });
}

fn bench_full_reveal(c: &mut Criterion) {
    let config = GameConfig::new((20, 20), 60, 70, 10);
    let mut rng = SmallRng::seed_from_u64(0xfee1);
    let board = Board::generate(config, &mut rng).expect("board should build");

    c.bench_function("reveal_20x20_sweep", |b| {
        b.iter(|| {
            let mut fresh = board.clone();
            let (w, h) = fresh.size();
            let mut opened = 0u32;
            for x in 0..w {
                for y in 0..h {
                    if !fresh.tile((x, y)).expect("in bounds").is_hazard() {
                        opened += u32::from(fresh.reveal((x, y)).expect("in bounds"));
                    }
                }
            }
            black_box(opened)
        })
    });
}

criterion_group!(benches, bench_generate, bench_full_reveal);
criterion_main!(benches);
