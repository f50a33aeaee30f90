//! Core data models for the reporting core.
//!
//! This module contains the input rows, facts and report records used
//! throughout the aggregators.

mod attendance;
mod order_line;
mod order_stats;
mod staff;

pub use attendance::{
    AttendanceDay, AttendanceMonthReport, ClockEvent, ClockEventType, ClockInRecord,
    ClockOutRecord, MonthlyClockRecords, StaffYearReport,
};
pub use order_line::{OrderLineFact, OrderLineRow, parse_price};
pub use order_stats::{
    Granularity, OrderBucketKey, OrderBucketSummary, OrderStatsBucket, OrderStatsItem, OrderTotal,
};
pub use staff::StaffMember;
