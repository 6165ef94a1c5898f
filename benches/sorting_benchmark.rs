use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;
use rowsort::prelude::*;
use serde_json::{Value as Json, json};
use std::hint::black_box;

fn random_records(count: usize) -> Vec<Json> {
    let mut rng = rand::rng();
    (0..count)
        .map(|i| {
            let len = rng.random_range(4..12);
            let name: String = (0..len)
                .map(|_| rng.random_range(b'a'..=b'z') as char)
                .collect();
            json!({
                "student_number": format!("{:06}", rng.random_range(0..1_000_000)),
                "name": name,
                "gpa": (rng.random_range(0..=400) as f64) / 100.0,
                "id": i,
            })
        })
        .collect()
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Record Sort");
    group.sample_size(10);

    // Quadratic sorts dominate past a few thousand records.
    for count in [100, 1_000] {
        let records = random_records(count);

        for algorithm in SortAlgorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), count),
                &records,
                |b, records| b.iter(|| sort(algorithm, black_box(records), Some("name"), true)),
            );
        }

        // Std stable sort on the same key, as a baseline.
        group.bench_with_input(
            BenchmarkId::new("slice::sort_by", count),
            &records,
            |b, records| {
                b.iter(|| {
                    let mut view: Vec<&Json> = black_box(records).iter().collect();
                    view.sort_by_key(|r| r["name"].as_str().map(str::to_lowercase));
                    view
                })
            },
        );
    }

    group.finish();
}

fn bench_mixed_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("Mixed Key Types");
    group.sample_size(10);

    // Half the records carry numeric gpas, half textual ones: forces string-form comparison.
    let mut records = random_records(1_000);
    for record in records.iter_mut().step_by(2) {
        let gpa = record["gpa"].to_string();
        record["gpa"] = Json::String(gpa);
    }

    group.bench_function("merge", |b| {
        b.iter(|| merge_sort(black_box(&records), Some("gpa"), false))
    });
    group.bench_function("shell", |b| {
        b.iter(|| shell_sort(black_box(&records), Some("gpa"), false))
    });

    group.finish();
}

criterion_group!(benches, bench_algorithms, bench_mixed_keys);
criterion_main!(benches);
