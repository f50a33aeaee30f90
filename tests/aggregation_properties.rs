//! Property tests for the aggregators.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use storefront_reports::aggregation::{
    AttendanceLedger, aggregate_all, days_in_month, monthly_report,
};
use storefront_reports::models::{
    Granularity, OrderBucketKey, OrderBucketSummary, OrderLineFact, StaffMember,
};

fn tz8() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

fn staff() -> StaffMember {
    StaffMember {
        id: 1,
        username: "clerk01".to_string(),
        name: None,
        is_backend: false,
        is_deleted: false,
        is_office_staff: true,
    }
}

// 2023-01-01T00:00:00Z .. 2025-01-01T00:00:00Z
const START_SECS: i64 = 1_672_531_200;
const END_SECS: i64 = 1_735_689_600;

fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (START_SECS..END_SECS).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

fn granularity() -> impl Strategy<Value = Granularity> {
    prop_oneof![
        Just(Granularity::Day),
        Just(Granularity::Month),
        Just(Granularity::Year),
    ]
}

fn fact() -> impl Strategy<Value = OrderLineFact> {
    (
        timestamp(),
        prop::sample::select(vec!["包子", "饅頭", "飲料"]),
        prop::sample::select(vec!["小兔豆沙包(素)", "鮮肉包", "黑糖饅頭", "豆漿"]),
        0i64..1_000,
        -5i64..50,
    )
        .prop_map(|(ts, category, name, unit_price, quantity)| OrderLineFact {
            order_id: Uuid::nil(),
            order_timestamp: ts,
            product_category: category.to_string(),
            product_name: name.to_string(),
            unit_price,
            quantity,
        })
}

fn totals_by_key(summaries: &[OrderBucketSummary]) -> HashMap<OrderBucketKey, (i128, i128)> {
    let mut totals: HashMap<OrderBucketKey, (i128, i128)> = HashMap::new();
    for summary in summaries {
        let entry = totals.entry(summary.bucket_key.clone()).or_default();
        entry.0 += summary.total_quantity;
        entry.1 += summary.total_amount;
    }
    totals
}

proptest! {
    #[test]
    fn aggregate_all_is_idempotent(
        facts in prop::collection::vec(fact(), 0..60),
        granularity in granularity(),
    ) {
        let first = aggregate_all(&facts, granularity, tz8());
        let second = aggregate_all(&facts, granularity, tz8());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn totals_are_conserved_across_partitions(
        facts in prop::collection::vec(fact(), 0..60),
        split in 0usize..60,
        granularity in granularity(),
    ) {
        let split = split.min(facts.len());
        let (left, right) = facts.split_at(split);

        let whole = totals_by_key(&aggregate_all(&facts, granularity, tz8()));
        let mut halves = aggregate_all(left, granularity, tz8());
        halves.extend(aggregate_all(right, granularity, tz8()));
        let merged = totals_by_key(&halves);

        prop_assert_eq!(whole, merged);
    }

    #[test]
    fn one_summary_per_key_in_total_order(
        facts in prop::collection::vec(fact(), 0..60),
        granularity in granularity(),
    ) {
        let summaries = aggregate_all(&facts, granularity, tz8());

        for pair in summaries.windows(2) {
            let (a, b) = (&pair[0].bucket_key, &pair[1].bucket_key);
            let ordered = a.bucket_start > b.bucket_start
                || (a.bucket_start == b.bucket_start
                    && (a.product_category.as_str(), a.product_name.as_str())
                        < (b.product_category.as_str(), b.product_name.as_str()));
            prop_assert!(ordered, "out of order or duplicate key: {:?} then {:?}", a, b);
        }

        let quantity: i128 = summaries.iter().map(|s| s.total_quantity).sum();
        let expected: i128 = facts.iter().map(|f| i128::from(f.quantity)).sum();
        prop_assert_eq!(quantity, expected);
    }

    #[test]
    fn monthly_report_covers_every_day(year in 1990i32..2100, month in 1u32..=12) {
        let report = monthly_report(&staff(), year, month, &[], tz8()).unwrap();
        prop_assert_eq!(report.days.len() as u32, days_in_month(year, month).unwrap());
        prop_assert!(report.days.iter().all(|day| day.is_absent()));
    }

    #[test]
    fn ledger_keeps_one_clock_in_and_one_clock_out_per_day(
        mut punches in prop::collection::vec((timestamp(), any::<bool>()), 1..40),
    ) {
        punches.sort_by_key(|(ts, _)| *ts);
        let mut ledger = AttendanceLedger::default();

        for (ts, is_clock_in) in &punches {
            if *is_clock_in {
                ledger.clock_in(1, *ts, tz8());
            } else {
                let _ = ledger.clock_out(1, *ts, tz8());
            }
        }

        let mut in_days: Vec<_> = ledger
            .clock_ins()
            .iter()
            .map(|r| r.clock_in_time.with_timezone(&tz8()).date_naive())
            .collect();
        let before = in_days.len();
        in_days.dedup();
        prop_assert_eq!(before, in_days.len());

        let mut out_days: Vec<_> = ledger
            .clock_outs()
            .iter()
            .map(|r| r.clock_out_time.with_timezone(&tz8()).date_naive())
            .collect();
        let before = out_days.len();
        out_days.dedup();
        prop_assert_eq!(before, out_days.len());

        if let Some(last) = ledger.clock_outs().last() {
            let month = last.clock_out_time.with_timezone(&tz8());
            let report =
                monthly_report(&staff(), month.year(), month.month(), &ledger.events(), tz8())
                    .unwrap();
            let day = &report.days[month.day() as usize - 1];
            prop_assert_eq!(day.clock_out_time, Some(month));
        }
    }
}
