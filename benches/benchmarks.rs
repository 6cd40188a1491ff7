use std::time::Duration;

use criterion::{BenchmarkId, black_box, criterion_group, criterion_main, Criterion};
use placeip::{ExpiringStore, ServerKey};

/// Key derivation runs on every lookup, hit or miss
fn benchmark_server_key(c: &mut Criterion) {
    c.bench_function("server_key", |b| {
        b.iter(|| ServerKey::new(black_box(4924922222), black_box("game-job-42")).cache_key())
    });
}

/// Hot path: cache hits at different store sizes
fn benchmark_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    for size in [100usize, 10_000] {
        let store = ExpiringStore::new(Duration::from_secs(300));
        for i in 0..size {
            store.set(format!("{}:job-{}", i, i), format!("10.0.{}.{}", i / 256 % 256, i % 256));
        }

        group.bench_with_input(BenchmarkId::new("get_hit", size), &size, |b, &size| {
            let key = format!("{}:job-{}", size / 2, size / 2);
            b.iter(|| black_box(store.get(&key)))
        });

        group.bench_with_input(BenchmarkId::new("get_miss", size), &size, |b, _| {
            b.iter(|| black_box(store.get("0:missing")))
        });

        group.bench_with_input(BenchmarkId::new("set", size), &size, |b, _| {
            b.iter(|| store.set("1:overwrite", "10.0.0.5".to_string()))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_server_key, benchmark_store);
criterion_main!(benches);
