//! Criterion benchmarks for the legality hot path.
//!
//! Run with:
//!     cargo bench --bench legality

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dice_city::{check_placement, legal_columns, validate_commit, CellType, Dice, ProvisionalBuffer};

fn all_rolls() -> Vec<Dice> {
    let mut rolls = Vec::with_capacity(36);
    for a in 1..=6 {
        for b in 1..=6 {
            if let Ok(dice) = Dice::rolled(a, b) {
                rolls.push(dice);
            }
        }
    }
    rolls
}

fn bench_check_placement(c: &mut Criterion) {
    let rolls = all_rolls();

    c.bench_function("check_placement/all_rolls_projects_columns", |b| {
        b.iter(|| {
            let mut legal = 0usize;
            for dice in &rolls {
                for project in CellType::PROJECTS {
                    for column in 1..=6 {
                        if check_placement(black_box(dice), project, column).is_ok() {
                            legal += 1;
                        }
                    }
                }
            }
            legal
        })
    });

    c.bench_function("legal_columns/all_rolls", |b| {
        b.iter(|| {
            rolls
                .iter()
                .map(|dice| legal_columns(black_box(dice), CellType::Factory).len())
                .sum::<usize>()
        })
    });
}

fn bench_validate_commit(c: &mut Criterion) {
    let dice = Dice::rolled(3, 6).unwrap_or_default();
    let mut buffer = ProvisionalBuffer::new();
    buffer.stage(0, 5, CellType::Lake);
    buffer.stage(1, 2, CellType::Factory);

    c.bench_function("validate_commit/category_pair", |b| {
        b.iter(|| validate_commit(black_box(&dice), black_box(&buffer)))
    });
}

criterion_group!(benches, bench_check_placement, bench_validate_commit);
criterion_main!(benches);
