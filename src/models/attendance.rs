//! Time clock records and attendance report models.
//!
//! Clock records are the persisted shape the ledger mutates. [`ClockEvent`] is
//! the flat fact the attendance aggregator reads, and the report types are
//! serialize-only views of one staff member's calendar.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a time clock punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockEventType {
    /// Start of the working day.
    ClockIn,
    /// End of the working day.
    ClockOut,
}

/// A single punch on the time clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    /// The staff member who punched.
    pub staff_id: u64,
    /// Clock-in or clock-out.
    pub event_type: ClockEventType,
    /// When the punch happened (UTC).
    pub timestamp: DateTime<Utc>,
}

/// A stored clock-in. At most one exists per staff member per local day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInRecord {
    /// The staff member.
    pub staff_id: u64,
    /// When they clocked in (UTC).
    pub clock_in_time: DateTime<Utc>,
}

/// A stored clock-out. Later punches on the same local day overwrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockOutRecord {
    /// The staff member.
    pub staff_id: u64,
    /// When they clocked out (UTC).
    pub clock_out_time: DateTime<Utc>,
}

impl From<&ClockInRecord> for ClockEvent {
    fn from(record: &ClockInRecord) -> Self {
        ClockEvent {
            staff_id: record.staff_id,
            event_type: ClockEventType::ClockIn,
            timestamp: record.clock_in_time,
        }
    }
}

impl From<&ClockOutRecord> for ClockEvent {
    fn from(record: &ClockOutRecord) -> Self {
        ClockEvent {
            staff_id: record.staff_id,
            event_type: ClockEventType::ClockOut,
            timestamp: record.clock_out_time,
        }
    }
}

/// One calendar day of a staff member's attendance.
///
/// Serializes as `{"clock_in_time": ..., "clock_out_time": ...}` with `null`
/// for a missing punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceDay {
    /// The staff member.
    #[serde(skip_serializing)]
    pub staff_id: u64,
    /// The local calendar date.
    #[serde(skip_serializing)]
    pub date: NaiveDate,
    /// Local clock-in time, if any.
    pub clock_in_time: Option<DateTime<FixedOffset>>,
    /// Local clock-out time, if any.
    pub clock_out_time: Option<DateTime<FixedOffset>>,
}

impl AttendanceDay {
    /// Returns true when neither punch was recorded.
    pub fn is_absent(&self) -> bool {
        self.clock_in_time.is_none() && self.clock_out_time.is_none()
    }
}

/// A staff member's attendance for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceMonthReport {
    /// Login name.
    pub staff: String,
    /// Account id.
    pub staff_id: u64,
    /// Display name.
    pub staff_name: String,
    /// Report year.
    #[serde(skip_serializing)]
    pub year: i32,
    /// Report month (1-12).
    #[serde(skip_serializing)]
    pub month: u32,
    /// One entry per day of the month, in date order.
    #[serde(rename = "monthly_records")]
    pub days: Vec<AttendanceDay>,
}

/// The per-month slice of a [`StaffYearReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyClockRecords {
    /// Report month (1-12).
    #[serde(skip_serializing)]
    pub month: u32,
    /// One entry per day of the month.
    pub clock_records: Vec<AttendanceDay>,
}

/// A staff member's attendance for every month of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffYearReport {
    /// Login name.
    pub staff: String,
    /// Account id.
    pub staff_id: u64,
    /// Display name.
    pub staff_name: String,
    /// Report year.
    #[serde(skip_serializing)]
    pub year: i32,
    /// Months 1 through 12.
    pub monthly_records: Vec<MonthlyClockRecords>,
}
