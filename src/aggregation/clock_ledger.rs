//! Time clock merge policy.
//!
//! The ledger holds a snapshot of stored clock records and applies the two
//! write rules of the physical time clock:
//!
//! - a staff member clocks in at most once per local day
//! - a clock-out on the same local day as the latest clock-out overwrites it,
//!   while a clock-out on a new day appends a fresh record
//!
//! Serializing concurrent writers for one staff member is the caller's job.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ReportError, ReportResult};
use crate::models::{ClockEvent, ClockInRecord, ClockOutRecord};

use super::time_bucket::local_date;

/// Result of a clock-in attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockInOutcome {
    /// A new clock-in record was stored.
    Recorded,
    /// The staff member already clocked in today; nothing changed.
    AlreadyClockedIn,
}

impl ClockInOutcome {
    /// User-facing message for the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            ClockInOutcome::Recorded => "Clocked in",
            ClockInOutcome::AlreadyClockedIn => "Already clocked in today",
        }
    }
}

/// Result of a successful clock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockOutOutcome {
    /// A new clock-out record was appended.
    Recorded,
    /// Today's clock-out record was moved to the new time.
    Overwritten,
}

impl ClockOutOutcome {
    /// User-facing message for the outcome.
    pub fn message(&self) -> &'static str {
        "Clocked out"
    }
}

/// Snapshot of stored clock records for one or more staff members.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::{AttendanceLedger, ClockInOutcome, ClockOutOutcome};
/// use chrono::{FixedOffset, TimeZone, Utc};
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let mut ledger = AttendanceLedger::default();
///
/// let morning = Utc.with_ymd_and_hms(2023, 11, 1, 1, 0, 0).unwrap();
/// let evening = Utc.with_ymd_and_hms(2023, 11, 1, 10, 0, 0).unwrap();
/// let later = Utc.with_ymd_and_hms(2023, 11, 1, 11, 0, 0).unwrap();
///
/// assert_eq!(ledger.clock_in(1, morning, tz8), ClockInOutcome::Recorded);
/// assert_eq!(ledger.clock_out(1, evening, tz8).unwrap(), ClockOutOutcome::Recorded);
/// assert_eq!(ledger.clock_out(1, later, tz8).unwrap(), ClockOutOutcome::Overwritten);
/// assert_eq!(ledger.clock_outs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceLedger {
    clock_ins: Vec<ClockInRecord>,
    clock_outs: Vec<ClockOutRecord>,
}

impl AttendanceLedger {
    /// Creates a ledger over previously stored records.
    pub fn new(clock_ins: Vec<ClockInRecord>, clock_outs: Vec<ClockOutRecord>) -> Self {
        Self {
            clock_ins,
            clock_outs,
        }
    }

    /// Returns all clock-in records.
    pub fn clock_ins(&self) -> &[ClockInRecord] {
        &self.clock_ins
    }

    /// Returns all clock-out records.
    pub fn clock_outs(&self) -> &[ClockOutRecord] {
        &self.clock_outs
    }

    /// Records a clock-in unless the staff member already clocked in on the same local day.
    pub fn clock_in(
        &mut self,
        staff_id: u64,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> ClockInOutcome {
        let today = local_date(now, offset);
        let already = self.clock_ins.iter().any(|record| {
            record.staff_id == staff_id && local_date(record.clock_in_time, offset) == today
        });

        if already {
            info!(staff_id, date = %today, "Duplicate clock-in ignored");
            return ClockInOutcome::AlreadyClockedIn;
        }

        self.clock_ins.push(ClockInRecord {
            staff_id,
            clock_in_time: now,
        });
        info!(staff_id, date = %today, "Clock-in recorded");
        ClockInOutcome::Recorded
    }

    /// Records a clock-out.
    ///
    /// The staff member's most recent clock-out is overwritten when it falls on
    /// the same local calendar date as `now`; otherwise a new record is appended.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MustClockInFirst`] when the staff member has no
    /// clock-in record at all.
    pub fn clock_out(
        &mut self,
        staff_id: u64,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> ReportResult<ClockOutOutcome> {
        if !self.clock_ins.iter().any(|record| record.staff_id == staff_id) {
            warn!(staff_id, "Clock-out rejected without prior clock-in");
            return Err(ReportError::MustClockInFirst { staff_id });
        }

        let today = local_date(now, offset);
        let latest = self
            .clock_outs
            .iter()
            .enumerate()
            .filter(|(_, record)| record.staff_id == staff_id)
            .max_by_key(|(_, record)| record.clock_out_time)
            .map(|(index, record)| (index, local_date(record.clock_out_time, offset)));

        match latest {
            Some((index, date)) if date == today => {
                self.clock_outs[index].clock_out_time = now;
                info!(staff_id, date = %today, "Clock-out overwritten");
                Ok(ClockOutOutcome::Overwritten)
            }
            _ => {
                self.clock_outs.push(ClockOutRecord {
                    staff_id,
                    clock_out_time: now,
                });
                info!(staff_id, date = %today, "Clock-out recorded");
                Ok(ClockOutOutcome::Recorded)
            }
        }
    }

    /// Returns every record as a [`ClockEvent`], clock-ins first.
    pub fn events(&self) -> Vec<ClockEvent> {
        self.clock_ins
            .iter()
            .map(ClockEvent::from)
            .chain(self.clock_outs.iter().map(ClockEvent::from))
            .collect()
    }

    /// Returns one staff member's records as [`ClockEvent`]s.
    pub fn events_for(&self, staff_id: u64) -> Vec<ClockEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.staff_id == staff_id)
            .collect()
    }
}
