//! Timezone normalization and calendar truncation.
//!
//! Timestamps are stored in UTC and reported in a fixed local offset (the
//! storefront runs on `+08:00`). Offsets are fixed; there is no DST handling.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::error::{ReportError, ReportResult};
use crate::models::Granularity;

/// Converts a UTC instant to the local offset.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::to_local;
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let local = to_local(Utc.with_ymd_and_hms(2023, 10, 31, 16, 0, 0).unwrap(), tz8);
/// assert_eq!(local.to_rfc3339(), "2023-11-01T00:00:00+08:00");
/// ```
pub fn to_local(timestamp: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    timestamp.with_timezone(&offset)
}

/// Returns the local calendar date of a UTC instant.
pub fn local_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    to_local(timestamp, offset).date_naive()
}

/// Truncates a UTC instant to the local start of its bucket.
///
/// The shift to local time happens before truncation, so an instant exactly on
/// a local boundary belongs to the bucket that starts there.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::bucket_start;
/// use storefront_reports::models::Granularity;
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let ts = Utc.with_ymd_and_hms(2023, 11, 1, 1, 0, 0).unwrap();
///
/// let day = bucket_start(ts, Granularity::Day, tz8);
/// assert_eq!(day.format("%Y-%m-%dT%H:%M:%S%z").to_string(), "2023-11-01T00:00:00+0800");
///
/// let year = bucket_start(ts, Granularity::Year, tz8);
/// assert_eq!(year.format("%Y-%m-%d").to_string(), "2023-01-01");
/// ```
pub fn bucket_start(
    timestamp: DateTime<Utc>,
    granularity: Granularity,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    let date = local_date(timestamp, offset);
    let first_day = match granularity {
        Granularity::Day => date,
        Granularity::Month => date.with_day(1).expect("Valid first of month"),
        Granularity::Year => date.with_ordinal(1).expect("Valid first of year"),
    };
    local_midnight(first_day, offset)
}

/// Returns midnight of a local calendar date as an offset-aware instant.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let local: NaiveDateTime = date.and_hms_opt(0, 0, 0).expect("Valid midnight time");
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Returns the number of days in a calendar month.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// assert!(days_in_month(2023, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> ReportResult<u32> {
    let invalid = || ReportError::InvalidPeriod { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok((next_first - first).num_days() as u32)
}

/// Parses a `+HH:MM` / `-HH:MM` offset string.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::parse_utc_offset;
///
/// let offset = parse_utc_offset("+08:00").unwrap();
/// assert_eq!(offset.local_minus_utc(), 8 * 3600);
/// assert!(parse_utc_offset("Asia/Taipei").is_err());
/// ```
pub fn parse_utc_offset(value: &str) -> ReportResult<FixedOffset> {
    value
        .trim()
        .parse::<FixedOffset>()
        .map_err(|_| ReportError::InvalidTimezone {
            value: value.to_string(),
        })
}
