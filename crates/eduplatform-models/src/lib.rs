//! # EduPlatform Models
//!
//! Domain models for EduPlatform: users of the four roles, assignments,
//! grades, schedules and notifications.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed ids and the [`ids::IdSequence`] generator
//! - [`roles`]: The fixed [`Role`] enumeration
//! - [`users`]: [`User`], its shared profile and role payloads
//! - [`assignments`]: [`Assignment`] and its submission/grade rules
//! - [`grades`]: [`Score`] and grade records
//! - [`notifications`]: Per-user inbox
//! - [`schedules`]: Class timetables
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_models::{User, UserProfile, StudentRecord, UserId};
//!
//! let profile = UserProfile::new(UserId::new(3), "Alice Adam", "alice@edu.com", hash);
//! let user = User::student(profile, StudentRecord::new("9-A"));
//! assert_eq!(user.role(), Role::Student);
//! ```

pub mod assignments;
pub mod grades;
pub mod ids;
pub mod notifications;
pub mod roles;
pub mod schedules;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use assignments::{
    Assignment, AssignmentStatus, DEADLINE_EXPORT_FORMAT, DEADLINE_INPUT_FORMAT, Difficulty,
    NewAssignment, parse_deadline,
};
pub use grades::{GradeRecord, Score};
pub use ids::{AssignmentId, GradeId, IdSequence, NotificationId, ScheduleId, UserId};
pub use notifications::{Inbox, Notification, Priority};
pub use roles::Role;
pub use schedules::{Lesson, Schedule};
pub use users::{
    AdminRecord, MAX_SUBMISSION_CHARS, NotificationPreferences, ParentRecord, ProfileUpdate,
    ProfileView, RoleDetails, StudentRecord, SubmissionState, TeacherRecord, User, UserProfile,
};
