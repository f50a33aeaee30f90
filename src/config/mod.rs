//! Configuration loading for report generation.
//!
//! This module loads the reporting timezone, default order stats granularity
//! and attendance roster filter from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use storefront_reports::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/storefront").unwrap();
//! println!("Loaded: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceSection, DEFAULT_UTC_OFFSET_SECONDS, OrderStatsSection, ReportConfig,
    ReportMetadata, ReportingFile, TimezoneSection,
};
