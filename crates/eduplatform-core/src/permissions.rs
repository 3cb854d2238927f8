//! Capability tags held by administrators.
//!
//! Every admin account carries the full [`ADMIN_DEFAULTS`] list; the
//! constants exist so menus and checks never spell the tags by hand.
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_core::permissions;
//!
//! if admin.has_permission(permissions::DATA_EXPORT) {
//!     // show export menu
//! }
//! ```

/// Permission to register users
pub const MANAGE_USERS: &str = "manage_users";
/// Permission to read statistics and reports
pub const VIEW_REPORTS: &str = "view_reports";
/// Permission to change schedules and other system settings
pub const SYSTEM_SETTINGS: &str = "system_settings";
/// Permission to run the export pipeline
pub const DATA_EXPORT: &str = "data_export";
/// Permission to back up and restore data
pub const BACKUP_RESTORE: &str = "backup_restore";

/// Permissions granted to every admin, in display order.
pub const ADMIN_DEFAULTS: &[&str] = &[
    MANAGE_USERS,
    VIEW_REPORTS,
    SYSTEM_SETTINGS,
    DATA_EXPORT,
    BACKUP_RESTORE,
];

/// Returns true if `tag` is one of the known permission tags.
pub fn is_known(tag: &str) -> bool {
    ADMIN_DEFAULTS.contains(&tag)
}
