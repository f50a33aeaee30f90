//! Attendance aggregation.
//!
//! Clock events are bucketed by staff member and local calendar day. Every day
//! of the requested month is emitted, with explicit `None` punches for days
//! that have no events.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use tracing::debug;

use crate::error::{ReportError, ReportResult};
use crate::models::{
    AttendanceDay, AttendanceMonthReport, ClockEvent, ClockEventType, MonthlyClockRecords,
    StaffMember, StaffYearReport,
};

use super::time_bucket::{days_in_month, local_date, to_local};

#[derive(Debug, Default, Clone, Copy)]
struct DayPunches {
    clock_in: Option<DateTime<Utc>>,
    clock_out: Option<DateTime<Utc>>,
}

impl DayPunches {
    fn record(&mut self, event: &ClockEvent) {
        let slot = match event.event_type {
            ClockEventType::ClockIn => &mut self.clock_in,
            ClockEventType::ClockOut => &mut self.clock_out,
        };
        // Latest punch of the day wins.
        if slot.is_none_or(|existing| event.timestamp > existing) {
            *slot = Some(event.timestamp);
        }
    }
}

/// Builds one staff member's attendance calendar for a month.
///
/// Events belonging to other staff members or falling outside the month (in
/// local time) are ignored. The result always has one [`AttendanceDay`] per
/// calendar day, in date order.
///
/// # Errors
///
/// Returns [`ReportError::InvalidPeriod`] when `month` is not in `1..=12`.
///
/// # Example
///
/// ```
/// use storefront_reports::aggregation::monthly_report;
/// use storefront_reports::models::StaffMember;
/// use chrono::FixedOffset;
///
/// let tz8 = FixedOffset::east_opt(8 * 3600).unwrap();
/// let staff = StaffMember {
///     id: 1,
///     username: "clerk01".to_string(),
///     name: None,
///     is_backend: false,
///     is_deleted: false,
///     is_office_staff: true,
/// };
///
/// let report = monthly_report(&staff, 2024, 2, &[], tz8).unwrap();
/// assert_eq!(report.days.len(), 29);
/// assert!(report.days.iter().all(|day| day.is_absent()));
/// ```
pub fn monthly_report(
    staff: &StaffMember,
    year: i32,
    month: u32,
    events: &[ClockEvent],
    offset: FixedOffset,
) -> ReportResult<AttendanceMonthReport> {
    let num_days = days_in_month(year, month)?;

    let mut punches: HashMap<NaiveDate, DayPunches> = HashMap::new();
    for event in events.iter().filter(|e| e.staff_id == staff.id) {
        let date = local_date(event.timestamp, offset);
        if date.year() == year && date.month() == month {
            punches.entry(date).or_default().record(event);
        }
    }

    let days = (1..=num_days)
        .map(|day| {
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(ReportError::InvalidPeriod { year, month })?;
            let day_punches = punches.get(&date).copied().unwrap_or_default();
            Ok(AttendanceDay {
                staff_id: staff.id,
                date,
                clock_in_time: day_punches.clock_in.map(|ts| to_local(ts, offset)),
                clock_out_time: day_punches.clock_out.map(|ts| to_local(ts, offset)),
            })
        })
        .collect::<ReportResult<Vec<_>>>()?;

    debug!(
        staff_id = staff.id,
        year,
        month,
        days_with_punches = punches.len(),
        "Built monthly attendance"
    );

    Ok(AttendanceMonthReport {
        staff: staff.username.clone(),
        staff_id: staff.id,
        staff_name: staff.display_name().to_string(),
        year,
        month,
        days,
    })
}

/// Builds a twelve-month attendance report for every staff member.
///
/// Output follows the order of `staff_list`; within each report, months run
/// January to December. Staff with no entry in `events_by_staff` get a fully
/// absent year.
pub fn all_staff_yearly_report(
    staff_list: &[StaffMember],
    year: i32,
    events_by_staff: &HashMap<u64, Vec<ClockEvent>>,
    offset: FixedOffset,
) -> ReportResult<Vec<StaffYearReport>> {
    staff_list
        .iter()
        .map(|staff| {
            let events = events_by_staff
                .get(&staff.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let monthly_records = (1..=12)
                .map(|month| {
                    monthly_report(staff, year, month, events, offset).map(|report| {
                        MonthlyClockRecords {
                            month,
                            clock_records: report.days,
                        }
                    })
                })
                .collect::<ReportResult<Vec<_>>>()?;

            Ok(StaffYearReport {
                staff: staff.username.clone(),
                staff_id: staff.id,
                staff_name: staff.display_name().to_string(),
                year,
                monthly_records,
            })
        })
        .collect()
}

/// Indexes a flat event list by staff id, keeping each staff member's events in input order.
pub fn group_events_by_staff(events: Vec<ClockEvent>) -> HashMap<u64, Vec<ClockEvent>> {
    let mut grouped: HashMap<u64, Vec<ClockEvent>> = HashMap::new();
    for event in events {
        grouped.entry(event.staff_id).or_default().push(event);
    }
    grouped
}
