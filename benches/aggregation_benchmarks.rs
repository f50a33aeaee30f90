//! Performance benchmarks for the reporting core.
//!
//! Measures order stats over growing snapshots and attendance over a full
//! year roster.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::collections::HashMap;

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use uuid::Uuid;

use storefront_reports::aggregation::{
    aggregate_all, all_staff_yearly_report, group_events_by_staff,
};
use storefront_reports::models::{
    ClockEvent, ClockEventType, Granularity, OrderLineFact, StaffMember,
};

fn tz8() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

/// Creates `count` order lines spread over ninety days and twelve products.
fn create_facts(count: usize) -> Vec<OrderLineFact> {
    let start = Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap();
    let categories = ["包子", "饅頭", "飲料"];
    let names = ["小兔豆沙包(素)", "鮮肉包", "黑糖饅頭", "豆漿"];

    (0..count)
        .map(|i| OrderLineFact {
            order_id: Uuid::nil(),
            order_timestamp: start + Duration::minutes((i as i64 * 37) % (90 * 24 * 60)),
            product_category: categories[i % categories.len()].to_string(),
            product_name: names[i % names.len()].to_string(),
            unit_price: 20 + (i as i64 % 7) * 10,
            quantity: 1 + (i as i64 % 5),
        })
        .collect()
}

/// Creates a roster with two punches per working day for the whole year.
fn create_attendance(staff_count: u64) -> (Vec<StaffMember>, HashMap<u64, Vec<ClockEvent>>) {
    let staff: Vec<StaffMember> = (1..=staff_count)
        .map(|id| StaffMember {
            id,
            username: format!("clerk{:02}", id),
            name: None,
            is_backend: false,
            is_deleted: false,
            is_office_staff: true,
        })
        .collect();

    let first_morning = Utc.with_ymd_and_hms(2023, 1, 1, 1, 0, 0).unwrap();
    let events: Vec<ClockEvent> = (1..=staff_count)
        .flat_map(|id| {
            (0..365).flat_map(move |day| {
                let morning = first_morning + Duration::days(day);
                [
                    ClockEvent {
                        staff_id: id,
                        event_type: ClockEventType::ClockIn,
                        timestamp: morning,
                    },
                    ClockEvent {
                        staff_id: id,
                        event_type: ClockEventType::ClockOut,
                        timestamp: morning + Duration::hours(9),
                    },
                ]
            })
        })
        .collect();

    (staff, group_events_by_staff(events))
}

fn bench_order_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_stats");

    for size in [100usize, 1_000, 10_000] {
        let facts = create_facts(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("daily", size), &facts, |b, facts| {
            b.iter(|| black_box(aggregate_all(facts, Granularity::Day, tz8())))
        });
    }

    let facts = create_facts(10_000);
    group.bench_function("monthly_10000", |b| {
        b.iter(|| black_box(aggregate_all(&facts, Granularity::Month, tz8())))
    });

    group.finish();
}

fn bench_yearly_attendance(c: &mut Criterion) {
    let (staff, events) = create_attendance(10);

    c.bench_function("yearly_attendance_10_staff", |b| {
        b.iter(|| black_box(all_staff_yearly_report(&staff, 2023, &events, tz8()).unwrap()))
    });
}

criterion_group!(benches, bench_order_stats, bench_yearly_attendance);
criterion_main!(benches);
