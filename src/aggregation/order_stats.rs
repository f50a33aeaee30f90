//! Order statistics aggregation.
//!
//! Order line facts are bucketed by local date granularity and product
//! identity. Quantities and line amounts are summed per bucket, and the
//! output is emitted in a deterministic order:
//!
//! 1. bucket start, newest first
//! 2. product category, ascending
//! 3. product name, ascending

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ReportError, ReportResult};
use crate::models::{
    Granularity, OrderBucketKey, OrderBucketSummary, OrderLineFact, OrderLineRow,
    OrderStatsBucket, OrderStatsItem, OrderTotal,
};

use super::time_bucket::bucket_start;

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    quantity: i128,
    amount: i128,
}

impl Totals {
    fn add(&mut self, fact: &OrderLineFact) {
        self.quantity += i128::from(fact.quantity);
        self.amount += fact.line_amount();
    }
}

/// Converts raw rows into facts, failing the whole batch on the first bad row.
///
/// # Errors
///
/// Returns [`ReportError::MalformedNumeric`] when a price is not an exact whole
/// number.
pub fn facts_from_rows(rows: Vec<OrderLineRow>) -> ReportResult<Vec<OrderLineFact>> {
    rows.into_iter()
        .map(|row| {
            let order_id = row.order_id;
            OrderLineFact::try_from(row).inspect_err(|err| {
                warn!(order_id = %order_id, error = %err, "Rejected order line");
            })
        })
        .collect()
}

/// Aggregates order line facts into one summary per bucket and product.
///
/// Two facts merge iff their bucket start, category and name are all equal.
/// Totals are additive and accumulate in `i128`, so they never wrap; nothing is
/// validated or averaged.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::aggregate_all;
/// use storefront_reports::models::{Granularity, OrderLineFact};
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use uuid::Uuid;
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let fact = OrderLineFact {
///     order_id: Uuid::nil(),
///     order_timestamp: Utc.with_ymd_and_hms(2023, 11, 1, 1, 0, 0).unwrap(),
///     product_category: "包子".to_string(),
///     product_name: "小兔豆沙包(素)".to_string(),
///     unit_price: 180,
///     quantity: 2,
/// };
///
/// let summaries = aggregate_all(&[fact.clone(), fact], Granularity::Day, tz8);
/// assert_eq!(summaries.len(), 1);
/// assert_eq!(summaries[0].total_quantity, 4);
/// assert_eq!(summaries[0].total_amount, 720);
/// ```
pub fn aggregate_all(
    facts: &[OrderLineFact],
    granularity: Granularity,
    offset: FixedOffset,
) -> Vec<OrderBucketSummary> {
    let mut accumulator: HashMap<OrderBucketKey, Totals> = HashMap::new();

    for fact in facts {
        let key = OrderBucketKey {
            bucket_start: bucket_start(fact.order_timestamp, granularity, offset),
            product_category: fact.product_category.clone(),
            product_name: fact.product_name.clone(),
        };
        accumulator.entry(key).or_default().add(fact);
    }

    let mut summaries: Vec<OrderBucketSummary> = accumulator
        .into_iter()
        .map(|(bucket_key, totals)| OrderBucketSummary {
            bucket_key,
            total_quantity: totals.quantity,
            total_amount: totals.amount,
        })
        .collect();

    summaries.sort_by(|a, b| {
        let (a, b) = (&a.bucket_key, &b.bucket_key);
        b.bucket_start
            .cmp(&a.bucket_start)
            .then_with(|| a.product_category.cmp(&b.product_category))
            .then_with(|| a.product_name.cmp(&b.product_name))
    });

    debug!(
        facts = facts.len(),
        summaries = summaries.len(),
        granularity = %granularity,
        "Aggregated order lines"
    );

    summaries
}

/// Groups ordered summaries into one [`OrderStatsBucket`] per bucket start.
///
/// Input order is preserved, so summaries from [`aggregate_all`] yield buckets
/// newest first with items sorted by category and name.
pub fn group_by_bucket(summaries: Vec<OrderBucketSummary>) -> Vec<OrderStatsBucket> {
    let mut buckets: Vec<OrderStatsBucket> = Vec::new();

    for summary in summaries {
        let start = summary.bucket_key.bucket_start;
        if let Some(bucket) = buckets.last_mut().filter(|b| b.order_date == start) {
            bucket.items.push(summary.into());
            continue;
        }
        buckets.push(OrderStatsBucket {
            order_date: start,
            items: vec![OrderStatsItem::from(summary)],
        });
    }

    buckets
}

/// Aggregates the facts that fall in the current bucket of `reference`.
///
/// Always returns exactly one bucket keyed to the local start of the
/// reference's day, month or year, even when no fact matches.
pub fn aggregate_current(
    facts: &[OrderLineFact],
    granularity: Granularity,
    reference: DateTime<Utc>,
    offset: FixedOffset,
) -> OrderStatsBucket {
    let current = bucket_start(reference, granularity, offset);

    let in_bucket: Vec<OrderLineFact> = facts
        .iter()
        .filter(|fact| bucket_start(fact.order_timestamp, granularity, offset) == current)
        .cloned()
        .collect();

    OrderStatsBucket {
        order_date: current,
        items: aggregate_all(&in_bucket, granularity, offset)
            .into_iter()
            .map(OrderStatsItem::from)
            .collect(),
    }
}

/// Aggregates the facts whose local date equals the reference's local date.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::aggregate_today;
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let now = Utc.with_ymd_and_hms(2023, 11, 1, 4, 0, 0).unwrap();
///
/// let today = aggregate_today(&[], now, tz8);
/// assert!(today.items.is_empty());
/// assert_eq!(today.order_date.format("%Y-%m-%d").to_string(), "2023-11-01");
/// ```
pub fn aggregate_today(
    facts: &[OrderLineFact],
    reference: DateTime<Utc>,
    offset: FixedOffset,
) -> OrderStatsBucket {
    aggregate_current(facts, Granularity::Day, reference, offset)
}

/// Sums the lines of one order.
///
/// # Errors
///
/// Returns [`ReportError::OrderNotFound`] when no fact carries `order_id`.
pub fn order_total(facts: &[OrderLineFact], order_id: Uuid) -> ReportResult<OrderTotal> {
    let mut totals = Totals::default();
    let mut line_count = 0;

    for fact in facts.iter().filter(|f| f.order_id == order_id) {
        totals.add(fact);
        line_count += 1;
    }

    if line_count == 0 {
        return Err(ReportError::OrderNotFound { order_id });
    }

    Ok(OrderTotal {
        order_id,
        line_count,
        total_quantity: totals.quantity,
        total_amount: totals.amount,
    })
}
