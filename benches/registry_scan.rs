use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hostel_booking::registry;
use hostel_booking::Room;

fn rooms(count: u32) -> Vec<Room> {
    (1..=count)
        .map(|i| Room {
            id: i,
            hostel_type: if i % 2 == 0 { "Boys" } else { "Girls" }.to_string(),
            hostel_number: i % 4 + 1,
            seater: i % 3 + 1,
            room_number: format!("R-{i:04}"),
            price: f64::from((i * 37) % 5000),
            is_available: i % 5 != 0,
        })
        .collect()
}

// The registry deliberately uses linear scans; this keeps an eye on how they
// behave as the inventory grows.
pub fn registry_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("room_registry");

    for size in [100u32, 1_000, 10_000] {
        let inventory = rooms(size);
        group.bench_with_input(
            BenchmarkId::new("find_by_id", size),
            &inventory,
            |b, inventory| b.iter(|| registry::find_by_id(black_box(inventory), black_box(size))),
        );
        group.bench_with_input(
            BenchmarkId::new("filter_by_criteria", size),
            &inventory,
            |b, inventory| {
                b.iter(|| registry::filter_by_criteria(black_box(inventory), "Boys", 2, 3))
            },
        );
        group.bench_with_input(
            BenchmarkId::new("sort_by_price", size),
            &inventory,
            |b, inventory| b.iter(|| registry::sort_by_price_ascending(black_box(inventory))),
        );
    }

    group.finish();
}

criterion_group!(benches, registry_benchmark);
criterion_main!(benches);
