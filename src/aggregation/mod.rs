//! Aggregation logic for the reporting core.
//!
//! This module contains time bucketing (timezone normalization and calendar
//! truncation), order statistics aggregation, monthly and yearly attendance
//! reports, and the time clock merge policy.

mod attendance;
mod clock_ledger;
mod order_stats;
mod time_bucket;

pub use attendance::{all_staff_yearly_report, group_events_by_staff, monthly_report};
pub use clock_ledger::{AttendanceLedger, ClockInOutcome, ClockOutOutcome};
pub use order_stats::{
    aggregate_all, aggregate_current, aggregate_today, facts_from_rows, group_by_bucket,
    order_total,
};
pub use time_bucket::{
    bucket_start, days_in_month, local_date, local_midnight, parse_utc_offset, to_local,
};
