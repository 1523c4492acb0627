use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stockroom_core::ProductId;
use stockroom_infra::file_store::{FileFlavor, JsonFileStore};
use stockroom_inventory::{InMemoryProductStore, Inventory, ProductStore};

/// Inventory pre-filled with `size` products.
fn seeded<S: ProductStore>(store: S, size: u64) -> Inventory<S> {
    let mut inventory = Inventory::open(store);
    for i in 0..size {
        inventory
            .add_product(format!("Product {i}"), (i % 50) as i64, 1.0 + i as f64 / 100.0)
            .unwrap();
    }
    inventory
}

/// Every mutation rewrites the whole file, so cost grows with inventory size.
fn bench_update_with_file_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_quantity_json_file");
    group.sample_size(50);

    for size in [10u64, 100, 1_000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("products", size), size, |b, &size| {
            let dir = tempfile::tempdir().unwrap();
            let mut inventory = seeded(JsonFileStore::in_dir(dir.path(), FileFlavor::Json), size);
            let target = ProductId::new(size / 2 + 1);
            let mut quantity = 0i64;

            b.iter(|| {
                quantity = (quantity + 1) % 1_000;
                black_box(inventory.update_quantity(target, quantity));
            });
        });
    }

    group.finish();
}

/// Same workload without IO, as a baseline for the file store numbers.
fn bench_update_in_memory(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_quantity_in_memory");

    for size in [10u64, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::new("products", size), size, |b, &size| {
            let mut inventory = seeded(InMemoryProductStore::new(), size);
            let target = ProductId::new(size / 2 + 1);
            let mut quantity = 0i64;

            b.iter(|| {
                quantity = (quantity + 1) % 1_000;
                black_box(inventory.update_quantity(target, quantity));
            });
        });
    }

    group.finish();
}

fn bench_find_by_name(c: &mut Criterion) {
    let inventory = seeded(InMemoryProductStore::new(), 1_000);

    c.bench_function("find_by_name_1000", |b| {
        b.iter(|| black_box(inventory.find_by_name(black_box("product 99"))).len());
    });
}

fn bench_open_from_file(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path(), FileFlavor::Json);
    seeded(store.clone(), 1_000);

    c.bench_function("open_json_file_1000", |b| {
        b.iter(|| black_box(Inventory::open(store.clone()).len()));
    });
}

criterion_group!(
    benches,
    bench_update_with_file_store,
    bench_update_in_memory,
    bench_find_by_name,
    bench_open_from_file
);
criterion_main!(benches);
