//! Report engine facade.
//!
//! [`ReportEngine`] binds the aggregators to a loaded configuration. It
//! supplies the reporting offset and default granularity, resolves staff ids
//! against the caller's roster, and logs one line per completed report.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::{
    AttendanceLedger, ClockInOutcome, ClockOutOutcome, aggregate_all, aggregate_current,
    all_staff_yearly_report, facts_from_rows, group_by_bucket, group_events_by_staff,
    monthly_report, order_total,
};
use crate::config::ConfigLoader;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    AttendanceMonthReport, ClockEvent, Granularity, OrderLineRow, OrderStatsBucket, OrderTotal,
    StaffMember, StaffYearReport,
};

/// Entry point for all report and time clock operations.
///
/// Cheap to clone; every call allocates its own accumulator state.
///
/// # Example
///
/// ```
/// use storefront_reports::config::ConfigLoader;
/// use storefront_reports::engine::ReportEngine;
/// use chrono::{TimeZone, Utc};
///
/// let engine = ReportEngine::new(ConfigLoader::default());
/// let now = Utc.with_ymd_and_hms(2023, 11, 1, 4, 0, 0).unwrap();
///
/// let today = engine.order_stats_today(vec![], now).unwrap();
/// assert!(today.items.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ReportEngine {
    config: Arc<ConfigLoader>,
}

impl ReportEngine {
    /// Creates an engine with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Order statistics for every bucket in the snapshot.
    ///
    /// Uses the configured default granularity when `granularity` is `None`.
    pub fn order_stats(
        &self,
        rows: Vec<OrderLineRow>,
        granularity: Option<Granularity>,
    ) -> ReportResult<Vec<OrderStatsBucket>> {
        let report_id = Uuid::new_v4();
        let started = Instant::now();
        let granularity = granularity.unwrap_or(self.config.default_granularity());

        let facts = facts_from_rows(rows)?;
        let buckets = group_by_bucket(aggregate_all(
            &facts,
            granularity,
            self.config.utc_offset(),
        ));

        info!(
            report_id = %report_id,
            granularity = %granularity,
            lines = facts.len(),
            buckets = buckets.len(),
            duration_us = started.elapsed().as_micros(),
            "Order stats completed"
        );
        Ok(buckets)
    }

    /// Order statistics for the local day containing `now`.
    pub fn order_stats_today(
        &self,
        rows: Vec<OrderLineRow>,
        now: DateTime<Utc>,
    ) -> ReportResult<OrderStatsBucket> {
        self.order_stats_current(rows, Granularity::Day, now)
    }

    /// Order statistics for the local day, month or year containing `now`.
    pub fn order_stats_current(
        &self,
        rows: Vec<OrderLineRow>,
        granularity: Granularity,
        now: DateTime<Utc>,
    ) -> ReportResult<OrderStatsBucket> {
        let report_id = Uuid::new_v4();
        let started = Instant::now();
        let facts = facts_from_rows(rows)?;
        let bucket = aggregate_current(&facts, granularity, now, self.config.utc_offset());

        info!(
            report_id = %report_id,
            granularity = %granularity,
            lines = facts.len(),
            items = bucket.items.len(),
            duration_us = started.elapsed().as_micros(),
            "Current order stats completed"
        );
        Ok(bucket)
    }

    /// Totals for a single order.
    pub fn order_total(&self, rows: Vec<OrderLineRow>, order_id: Uuid) -> ReportResult<OrderTotal> {
        let facts = facts_from_rows(rows)?;
        order_total(&facts, order_id).inspect_err(|err| {
            warn!(order_id = %order_id, error = %err, "Order total failed");
        })
    }

    /// One staff member's attendance for a month.
    ///
    /// # Errors
    ///
    /// [`ReportError::StaffNotFound`] when `staff_id` is not on the reportable
    /// roster; [`ReportError::InvalidPeriod`] for a bad month.
    pub fn staff_month_report(
        &self,
        roster: &[StaffMember],
        staff_id: u64,
        year: i32,
        month: u32,
        events: &[ClockEvent],
    ) -> ReportResult<AttendanceMonthReport> {
        let staff = self.find_reportable_staff(roster, staff_id)?;
        let report = monthly_report(staff, year, month, events, self.config.utc_offset())?;

        info!(
            staff_id,
            year,
            month,
            days = report.days.len(),
            "Monthly attendance completed"
        );
        Ok(report)
    }

    /// Twelve-month attendance for every reportable staff member, in roster order.
    pub fn staff_year_reports(
        &self,
        roster: &[StaffMember],
        year: i32,
        events: Vec<ClockEvent>,
    ) -> ReportResult<Vec<StaffYearReport>> {
        let started = Instant::now();
        let staff_list: Vec<StaffMember> = roster
            .iter()
            .filter(|staff| self.is_reportable(staff))
            .cloned()
            .collect();

        let by_staff = group_events_by_staff(events);
        let reports =
            all_staff_yearly_report(&staff_list, year, &by_staff, self.config.utc_offset())?;

        info!(
            year,
            staff = reports.len(),
            duration_us = started.elapsed().as_micros(),
            "Yearly attendance completed"
        );
        Ok(reports)
    }

    /// Applies a clock-in for a rostered staff member.
    pub fn clock_in(
        &self,
        ledger: &mut AttendanceLedger,
        roster: &[StaffMember],
        staff_id: u64,
        now: DateTime<Utc>,
    ) -> ReportResult<ClockInOutcome> {
        let staff = find_staff(roster, staff_id)?;
        Ok(ledger.clock_in(staff.id, now, self.config.utc_offset()))
    }

    /// Applies a clock-out for a rostered staff member.
    pub fn clock_out(
        &self,
        ledger: &mut AttendanceLedger,
        roster: &[StaffMember],
        staff_id: u64,
        now: DateTime<Utc>,
    ) -> ReportResult<ClockOutOutcome> {
        let staff = find_staff(roster, staff_id)?;
        ledger.clock_out(staff.id, now, self.config.utc_offset())
    }

    fn is_reportable(&self, staff: &StaffMember) -> bool {
        !self.config.office_staff_only() || staff.tracks_attendance()
    }

    fn find_reportable_staff<'a>(
        &self,
        roster: &'a [StaffMember],
        staff_id: u64,
    ) -> ReportResult<&'a StaffMember> {
        roster
            .iter()
            .find(|staff| staff.id == staff_id && self.is_reportable(staff))
            .ok_or_else(|| {
                warn!(staff_id, "Staff not on reportable roster");
                ReportError::StaffNotFound { staff_id }
            })
    }
}

/// Looks up a staff member by id.
///
/// # Errors
///
/// Returns [`ReportError::StaffNotFound`] when no roster entry has `staff_id`.
pub fn find_staff(roster: &[StaffMember], staff_id: u64) -> ReportResult<&StaffMember> {
    roster
        .iter()
        .find(|staff| staff.id == staff_id)
        .ok_or(ReportError::StaffNotFound { staff_id })
}
