//! Error types for the storefront reporting core.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a report or time-clock operation can reject.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the reporting core.
///
/// Aggregations never retry or swallow these; they are returned to the caller,
/// which decides how to map them onto its own response codes.
///
/// # Example
///
/// ```
/// use storefront_reports::error::ReportError;
///
/// let error = ReportError::StaffNotFound { staff_id: 42 };
/// assert_eq!(error.to_string(), "Staff not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A UTC offset string could not be understood.
    #[error("Invalid timezone offset: {value}")]
    InvalidTimezone {
        /// The offending offset text.
        value: String,
    },

    /// The requested staff member is not part of the supplied roster.
    #[error("Staff not found: {staff_id}")]
    StaffNotFound {
        /// The staff id that was requested.
        staff_id: u64,
    },

    /// No order line in the snapshot carries the requested order id.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// The order id that was requested.
        order_id: Uuid,
    },

    /// A clock-out was attempted before the staff member ever clocked in.
    #[error("Staff {staff_id} must clock in first")]
    MustClockInFirst {
        /// The staff member attempting to clock out.
        staff_id: u64,
    },

    /// A price or quantity could not be represented as an exact integer.
    #[error("Malformed numeric field '{field}' with value '{value}': {message}")]
    MalformedNumeric {
        /// The field name (e.g. "price").
        field: String,
        /// The raw value as received.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid report period {year}-{month}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = ReportError::ConfigNotFound {
            path: "/missing/reporting.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/reporting.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = ReportError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_must_clock_in_first_displays_staff() {
        let error = ReportError::MustClockInFirst { staff_id: 7 };
        assert_eq!(error.to_string(), "Staff 7 must clock in first");
    }

    #[test]
    fn test_malformed_numeric_displays_field_and_value() {
        let error = ReportError::MalformedNumeric {
            field: "price".to_string(),
            value: "12.5".to_string(),
            message: "price must be a whole number".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed numeric field 'price' with value '12.5': price must be a whole number"
        );
    }

    #[test]
    fn test_invalid_period_displays_year_and_month() {
        let error = ReportError::InvalidPeriod {
            year: 2023,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid report period 2023-13");
    }

    #[test]
    fn test_order_not_found_displays_id() {
        let order_id = Uuid::nil();
        let error = ReportError::OrderNotFound { order_id };
        assert_eq!(
            error.to_string(),
            "Order not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ReportError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_staff_not_found() -> ReportResult<()> {
            Err(ReportError::StaffNotFound { staff_id: 1 })
        }

        fn propagates_error() -> ReportResult<()> {
            returns_staff_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
