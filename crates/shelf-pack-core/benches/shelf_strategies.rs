use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use shelf_pack_core::prelude::*;
use std::hint::black_box;

fn generate_items(count: usize, max_width: u32, max_height: u32) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| Item::new(rng.gen_range(1..=max_width), rng.gen_range(1..=max_height)))
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("shelf_strategies");

    for count in [100usize, 1_000, 10_000] {
        let items = generate_items(count, 50, 50);
        let cfg = ShelfConfig::builder()
            .strip_width(100)
            .max_items(count)
            .max_shelves(count)
            .build();

        group.throughput(Throughput::Elements(count as u64));

        for policy in ShelfPolicy::ALL {
            group.bench_with_input(
                BenchmarkId::new(policy.as_str(), count),
                &items,
                |b, items| {
                    b.iter(|| black_box(pack_with(items, &cfg, policy)));
                },
            );
        }
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let items = generate_items(10_000, 50, 50);
    c.bench_function("sort_height_desc_10k", |b| {
        b.iter(|| black_box(sort_items(&items, SortOrder::HeightDesc)))
    });
}

criterion_group!(benches, bench_strategies, bench_sort);
criterion_main!(benches);
