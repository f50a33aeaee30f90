//! Staff model.

use serde::{Deserialize, Serialize};

/// A back-office account as supplied by the caller's roster query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Numeric account id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Optional display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Storefront backend service account.
    #[serde(default)]
    pub is_backend: bool,
    /// Soft-deleted account.
    #[serde(default)]
    pub is_deleted: bool,
    /// Office staff who use the time clock.
    #[serde(default)]
    pub is_office_staff: bool,
}

impl StaffMember {
    /// Returns the display name, falling back to the username.
    ///
    /// # Examples
    ///
    /// ```
    /// use storefront_reports::models::StaffMember;
    ///
    /// let staff = StaffMember {
    ///     id: 1,
    ///     username: "amy".to_string(),
    ///     name: None,
    ///     is_backend: false,
    ///     is_deleted: false,
    ///     is_office_staff: true,
    /// };
    /// assert_eq!(staff.display_name(), "amy");
    /// ```
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }

    /// Returns true for active office staff, the accounts that appear on attendance reports.
    pub fn tracks_attendance(&self) -> bool {
        !self.is_backend && !self.is_deleted && self.is_office_staff
    }
}
