use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;
use rowsort::prelude::*;
use serde_json::{Value as Json, json};
use std::hint::black_box;

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");

    for count in [1_000, 100_000] {
        let records: Vec<Json> = (0..count)
            .map(|i| json!({"id": i * 2, "name": format!("student {i}")}))
            .collect();

        let mut rng = rand::rng();
        let targets: Vec<String> = (0..64)
            .map(|_| (rng.random_range(0..count) * 2).to_string())
            .collect();

        for algorithm in [SearchAlgorithm::Linear, SearchAlgorithm::Binary] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), count),
                &records,
                |b, records| {
                    b.iter(|| {
                        for target in &targets {
                            black_box(search(algorithm, records, target.as_str(), Some("id")));
                        }
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("fuzzy_contains", count), &records, |b, records| {
            b.iter(|| fuzzy_contains_search(black_box(records), Some("name"), "99"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
