//! Order statistics output models.
//!
//! This module contains the bucket key and summary types produced by the order
//! stats aggregator, plus the grouped shape the back office renders.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Truncation unit for order statistics.
///
/// # Example
///
/// ```
/// use storefront_reports::models::Granularity;
///
/// let granularity: Granularity = serde_json::from_str("\"month\"").unwrap();
/// assert_eq!(granularity, Granularity::Month);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Local midnight of the calendar day.
    #[default]
    Day,
    /// Local midnight of the first day of the month.
    Month,
    /// Local midnight of January 1.
    Year,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

/// Identity of one summary row: the bucket plus the product it counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderBucketKey {
    /// Local start of the bucket.
    #[serde(with = "order_date_format")]
    pub bucket_start: DateTime<FixedOffset>,
    /// The product category.
    pub product_category: String,
    /// The product name.
    pub product_name: String,
}

/// Totals for every order line that maps to one [`OrderBucketKey`].
///
/// Totals are 128-bit so that summing any number of `i64` line amounts stays exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBucketSummary {
    /// The bucket and product identity.
    pub bucket_key: OrderBucketKey,
    /// Sum of quantities.
    pub total_quantity: i128,
    /// Sum of `unit_price * quantity`.
    pub total_amount: i128,
}

/// One product row inside an [`OrderStatsBucket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatsItem {
    /// The product category.
    pub product_category: String,
    /// The product name.
    pub product_name: String,
    /// Sum of quantities.
    pub total_quantity: i128,
    /// Sum of line amounts.
    pub total_amount: i128,
}

impl From<OrderBucketSummary> for OrderStatsItem {
    fn from(summary: OrderBucketSummary) -> Self {
        OrderStatsItem {
            product_category: summary.bucket_key.product_category,
            product_name: summary.bucket_key.product_name,
            total_quantity: summary.total_quantity,
            total_amount: summary.total_amount,
        }
    }
}

/// All product rows sharing one bucket start.
///
/// Serializes as `{"order_date": "2023-11-01T00:00:00+0800", "items": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatsBucket {
    /// Local start of the bucket.
    #[serde(with = "order_date_format")]
    pub order_date: DateTime<FixedOffset>,
    /// Product rows, ordered by category then name.
    pub items: Vec<OrderStatsItem>,
}

/// Totals for a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotal {
    /// The order id.
    pub order_id: Uuid,
    /// Number of order lines.
    pub line_count: usize,
    /// Sum of quantities.
    pub total_quantity: i128,
    /// Sum of line amounts.
    pub total_amount: i128,
}

mod order_date_format {
    use chrono::{DateTime, FixedOffset};
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

    pub fn serialize<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }
}
