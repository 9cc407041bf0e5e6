use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use red_black_paths::red_black_tree::RedBlackSet;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100;

fn random_values() -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..NUM_OF_OPERATIONS).map(|_| rng.gen::<u32>()).collect()
}

fn bench_btreeset_insert(c: &mut Criterion) {
    let values = random_values();
    c.bench_function("bench btreeset insert", move |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for value in &values {
                set.insert(*value);
            }
            black_box(set.len())
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let values = random_values();
    let set = values.iter().cloned().collect::<BTreeSet<u32>>();
    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.contains(value));
            }
        })
    });
}

fn bench_red_black_set_insert(c: &mut Criterion) {
    let values = random_values();
    c.bench_function("bench red_black_tree insert", move |b| {
        b.iter(|| {
            let mut set = RedBlackSet::new();
            for value in &values {
                let _ = set.insert(*value);
            }
            black_box(set.len())
        })
    });
}

fn bench_red_black_set_insert_sorted(c: &mut Criterion) {
    c.bench_function("bench red_black_tree insert sorted", |b| {
        b.iter(|| {
            let mut set = RedBlackSet::new();
            for value in 0..NUM_OF_OPERATIONS as u32 {
                let _ = set.insert(value);
            }
            black_box(set.black_height())
        })
    });
}

fn bench_red_black_set_contains(c: &mut Criterion) {
    let values = random_values();
    let set = values.iter().cloned().collect::<RedBlackSet<u32>>();
    c.bench_function("bench red_black_tree contains", move |b| {
        b.iter(|| {
            for value in &values {
                black_box(set.contains(value));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_btreeset_contains,
    bench_red_black_set_insert,
    bench_red_black_set_insert_sorted,
    bench_red_black_set_contains,
);
criterion_main!(benches);
