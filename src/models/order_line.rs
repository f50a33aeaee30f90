//! Order line input models.
//!
//! This module defines the raw [`OrderLineRow`] as it arrives from storage and
//! the validated [`OrderLineFact`] consumed by the order stats aggregator.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReportError, ReportResult};

/// An order line item joined with its product and order metadata.
///
/// Prices are stored as text by the catalog, so `price` is kept verbatim here
/// and only converted when the row becomes an [`OrderLineFact`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRow {
    /// The order this line belongs to.
    pub order_id: Uuid,
    /// When the order was created (stored in UTC).
    pub created_at: DateTime<Utc>,
    /// The product category, e.g. "包子".
    pub product_category: String,
    /// The product name, e.g. "小兔豆沙包(素)".
    pub product_name: String,
    /// The unit price as a decimal-formatted string.
    pub price: String,
    /// Number of units ordered.
    pub quantity: i64,
}

/// A single order line with an exact integer unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineFact {
    /// The order this line belongs to.
    pub order_id: Uuid,
    /// When the order was placed (UTC).
    pub order_timestamp: DateTime<Utc>,
    /// The product category.
    pub product_category: String,
    /// The product name.
    pub product_name: String,
    /// The unit price in whole currency units.
    pub unit_price: i64,
    /// Number of units ordered. Not validated; zero or negative values are summed as-is.
    pub quantity: i64,
}

impl OrderLineFact {
    /// Returns `unit_price * quantity`, widened so the product is always exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_reports::models::OrderLineFact;
    /// use chrono::{TimeZone, Utc};
    /// use uuid::Uuid;
    ///
    /// let fact = OrderLineFact {
    ///     order_id: Uuid::nil(),
    ///     order_timestamp: Utc.with_ymd_and_hms(2023, 11, 1, 1, 0, 0).unwrap(),
    ///     product_category: "包子".to_string(),
    ///     product_name: "小兔豆沙包(素)".to_string(),
    ///     unit_price: 180,
    ///     quantity: 2,
    /// };
    /// assert_eq!(fact.line_amount(), 360);
    /// ```
    pub fn line_amount(&self) -> i128 {
        i128::from(self.unit_price) * i128::from(self.quantity)
    }
}

impl TryFrom<OrderLineRow> for OrderLineFact {
    type Error = ReportError;

    fn try_from(row: OrderLineRow) -> ReportResult<Self> {
        let unit_price = parse_price(&row.price)?;

        Ok(OrderLineFact {
            order_id: row.order_id,
            order_timestamp: row.created_at,
            product_category: row.product_category,
            product_name: row.product_name,
            unit_price,
            quantity: row.quantity,
        })
    }
}

/// Parses a decimal-formatted price into an exact whole number.
///
/// The text is parsed as a [`Decimal`] first so that values such as `"180.00"`
/// are accepted without passing through binary floating point. Prices with a
/// non-zero fractional part are rejected.
///
/// # Examples
///
/// ```
/// use storefront_reports::models::parse_price;
///
/// assert_eq!(parse_price("180").unwrap(), 180);
/// assert_eq!(parse_price(" 180.00 ").unwrap(), 180);
/// assert!(parse_price("12.5").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(raw: &str) -> ReportResult<i64> {
    let malformed = |message: String| ReportError::MalformedNumeric {
        field: "price".to_string(),
        value: raw.to_string(),
        message,
    };

    let value = Decimal::from_str(raw.trim()).map_err(|e| malformed(e.to_string()))?;

    if !value.fract().is_zero() {
        return Err(malformed("price must be a whole number".to_string()));
    }

    value
        .to_i64()
        .ok_or_else(|| malformed("price is out of range".to_string()))
}
