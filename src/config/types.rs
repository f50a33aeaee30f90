//! Configuration types for report generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `reporting.yaml`.

use chrono::FixedOffset;
use serde::Deserialize;

use crate::models::Granularity;

/// Default storefront offset, `+08:00`.
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 8 * 3600;

/// Descriptive metadata about the report set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportMetadata {
    /// Human-readable name of the deployment.
    pub name: String,
    /// Version or effective date of this configuration.
    pub version: String,
}

/// Timezone section.
#[derive(Debug, Clone, Deserialize)]
pub struct TimezoneSection {
    /// Offset such as `"+08:00"`.
    pub utc_offset: String,
}

/// Order statistics section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderStatsSection {
    /// Granularity used when the caller does not ask for one.
    #[serde(default)]
    pub default_granularity: Granularity,
}

/// Attendance section.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceSection {
    /// Restrict yearly reports to active office staff.
    #[serde(default = "default_office_staff_only")]
    pub office_staff_only: bool,
}

impl Default for AttendanceSection {
    fn default() -> Self {
        Self {
            office_staff_only: default_office_staff_only(),
        }
    }
}

fn default_office_staff_only() -> bool {
    true
}

/// Layout of `reporting.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingFile {
    /// Report metadata.
    pub report: ReportMetadata,
    /// Timezone settings.
    pub timezone: TimezoneSection,
    /// Order statistics settings.
    #[serde(default)]
    pub order_stats: OrderStatsSection,
    /// Attendance settings.
    #[serde(default)]
    pub attendance: AttendanceSection,
}

/// Validated report configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    metadata: ReportMetadata,
    utc_offset: FixedOffset,
    default_granularity: Granularity,
    office_staff_only: bool,
}

impl ReportConfig {
    /// Creates a new ReportConfig from its component parts.
    pub fn new(
        metadata: ReportMetadata,
        utc_offset: FixedOffset,
        default_granularity: Granularity,
        office_staff_only: bool,
    ) -> Self {
        Self {
            metadata,
            utc_offset,
            default_granularity,
            office_staff_only,
        }
    }

    /// Returns the report metadata.
    pub fn metadata(&self) -> &ReportMetadata {
        &self.metadata
    }

    /// Returns the local offset reports are rendered in.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Returns the default order stats granularity.
    pub fn default_granularity(&self) -> Granularity {
        self.default_granularity
    }

    /// Returns whether yearly attendance is limited to active office staff.
    pub fn office_staff_only(&self) -> bool {
        self.office_staff_only
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            metadata: ReportMetadata {
                name: "Storefront back office".to_string(),
                version: "default".to_string(),
            },
            utc_offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS)
                .expect("Valid default offset"),
            default_granularity: Granularity::Day,
            office_staff_only: true,
        }
    }
}
