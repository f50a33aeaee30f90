//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading report
//! settings from YAML files.

use std::fs;
use std::path::Path;

use chrono::FixedOffset;

use crate::aggregation::parse_utc_offset;
use crate::error::{ReportError, ReportResult};
use crate::models::Granularity;

use super::types::{ReportConfig, ReportMetadata, ReportingFile};

/// Loads and provides access to report configuration.
///
/// # Directory Structure
///
/// ```text
/// config/storefront/
/// └── reporting.yaml   # Timezone, default granularity, roster filter
/// ```
///
/// # Example
///
/// ```no_run
/// use storefront_reports::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/storefront").unwrap();
/// println!("Reporting offset: {}", loader.utc_offset());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/storefront")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `reporting.yaml` is missing
    /// - the file contains invalid YAML or is missing a required field
    /// - the configured UTC offset cannot be parsed
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let reporting_path = path.as_ref().join("reporting.yaml");
        let file = Self::load_yaml::<ReportingFile>(&reporting_path)?;

        let utc_offset = parse_utc_offset(&file.timezone.utc_offset)?;

        let config = ReportConfig::new(
            file.report,
            utc_offset,
            file.order_stats.default_granularity,
            file.attendance.office_staff_only,
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> ReportResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying report configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Returns the report metadata.
    pub fn metadata(&self) -> &ReportMetadata {
        self.config.metadata()
    }

    /// Returns the local offset reports are rendered in.
    pub fn utc_offset(&self) -> FixedOffset {
        self.config.utc_offset()
    }

    /// Returns the default order stats granularity.
    pub fn default_granularity(&self) -> Granularity {
        self.config.default_granularity()
    }

    /// Returns whether yearly attendance is limited to active office staff.
    pub fn office_staff_only(&self) -> bool {
        self.config.office_staff_only()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::from_config(ReportConfig::default())
    }
}
