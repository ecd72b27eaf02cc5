use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rpni::prelude::*;

fn divisible_by_three(word: &str) -> bool {
    word.chars()
        .fold(0u8, |rest, c| (2 * rest + u8::from(c == 'b')) % 3)
        == 0
}

fn learn_random_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("rpni");
    for count in [25, 50, 100] {
        let mut rng = fastrand::Rng::with_seed(count as u64);
        let sample = generate_random_sample(&['a', 'b'], count, 10, divisible_by_three, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(count), &sample, |b, sample| {
            b.iter(|| rpni(black_box(sample)))
        });
    }
    group.finish();
}

fn build_prefix_tree(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(1);
    let words = generate_random_words(&['a', 'b', 'c'], 500, 0, 12, &mut rng);
    c.bench_function("prefix_tree", |b| b.iter(|| prefix_tree(black_box(&words))));
}

criterion_group!(benches, learn_random_samples, build_prefix_tree);
criterion_main!(benches);
