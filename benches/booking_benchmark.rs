use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng};
use std::sync::Arc;
use travel_booking_core::{
    build_travel_dates, calculate_cost, BookingRequest, BookingService, BookingStore, Catalog,
    InMemoryBookingStore, ServiceConfig, ValidationPolicy,
};

pub fn catalog_benchmark(c: &mut Criterion) {
    let catalog = Catalog::seeded().unwrap();
    let mut group = c.benchmark_group("catalog");

    for category in ["All", "Beaches", "Deserts"] {
        group.bench_with_input(
            BenchmarkId::new("destinations_by_category", category),
            category,
            |b, category| b.iter(|| black_box(catalog.destinations_by_category(category))),
        );
    }

    let package_ids: Vec<String> = catalog.packages().iter().map(|p| p.id.clone()).collect();
    group.bench_function("package_and_guide_cost", |b| {
        let mut rng = thread_rng();
        b.iter(|| {
            let package_id = package_ids.choose(&mut rng).unwrap();
            let package = catalog.package_by_id(package_id).unwrap();
            let guide = catalog
                .guides_by_destination_id(&package.destination_id)
                .first()
                .copied();
            black_box(calculate_cost(package, guide))
        });
    });

    group.bench_function("build_travel_dates_30", |b| {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        b.iter(|| black_box(build_travel_dates(start, 30)));
    });

    group.finish();
}

pub fn booking_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_memory_bookings");

    for bookings in [10usize, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(bookings),
            bookings,
            |b, &bookings| {
                b.iter(|| {
                    let store = Arc::new(InMemoryBookingStore::new());
                    let config = ServiceConfig {
                        validation: ValidationPolicy {
                            reject_past_start_date: false,
                            ..ValidationPolicy::default()
                        },
                        ..ServiceConfig::default()
                    };
                    let service = BookingService::new(
                        Arc::new(Catalog::seeded().unwrap()),
                        store.clone(),
                        config,
                    );
                    let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

                    tokio_test::block_on(async {
                        for i in 0..bookings {
                            let request = BookingRequest {
                                user_id: format!("user-{}", i % 10),
                                package_id: "pkg-003".to_string(),
                                guide_id: Some("guide-004".to_string()),
                                start_date: start + Days::new((i % 60) as u64),
                            };
                            service.create_booking(request).await.unwrap();
                        }
                        black_box(store.bookings_by_user_id("user-3").await.unwrap())
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, catalog_benchmark, booking_benchmark);
criterion_main!(benches);
