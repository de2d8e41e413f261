use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gigbook::records::{format_instant, BillingEntry};
use gigbook::views::{DateRange, EarningsView};
use rand::prelude::*;

const DOCUMENTS: [&str; 3] = ["Invoice", "Receipt", "Order Confirmation"];

fn generate_billing(size: usize) -> Vec<BillingEntry> {
    let mut rng = rand::thread_rng();
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    (0..size)
        .map(|i| BillingEntry {
            date: format_instant(start + Duration::minutes(rng.gen_range(0..60 * 24 * 730))),
            document: DOCUMENTS[rng.gen_range(0..DOCUMENTS.len())].to_owned(),
            service: format!("Service \"{}\"", rng.gen::<u16>()),
            order: format!("#{}", 1000 + i),
            currency: "USD".to_owned(),
            total: f64::from(rng.gen_range(5..5000)) / 4.0,
        })
        .collect()
}

fn earnings_view_benchmark(c: &mut Criterion) {
    let inputs = [
        ("earnings_small", 100),
        ("earnings_medium", 10_000),
        ("earnings_large", 100_000),
    ];
    let range = DateRange::parse(Some("2023-06-01"), Some("2024-05-31"))
        .expect("valid range");

    for (name, size) in inputs.iter() {
        let billing = generate_billing(*size);
        let mut group = c.benchmark_group(name.to_string());
        group.measurement_time(std::time::Duration::from_secs(5));

        group.bench_function("compute_unbounded", |b| {
            b.iter(|| EarningsView::compute(black_box(&billing), DateRange::default()))
        });
        group.bench_function("compute_range", |b| {
            b.iter(|| EarningsView::compute(black_box(&billing), range))
        });

        let view = EarningsView::compute(&billing, range);
        group.bench_function("statement", |b| b.iter(|| black_box(&view).statement()));

        group.finish();
    }
}

criterion_group!(benches, earnings_view_benchmark);
criterion_main!(benches);
