//! # EduPlatform Store
//!
//! The in-memory [`DataStore`] that owns every user, assignment, grade
//! record and schedule for one session, plus the aggregate reports shown to
//! administrators.
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_store::{DataStore, NewUser, NewRoleDetails};
//!
//! let mut store = DataStore::new();
//! let id = store.register_user(NewUser::new(
//!     "Alice Adam",
//!     "alice@edu.com",
//!     "student123",
//!     NewRoleDetails::Student { grade_label: "9-A".into() },
//! ))?;
//! let user = store.authenticate("alice@edu.com", "student123")?;
//! assert_eq!(user.id(), id);
//! ```

pub mod dto;
pub mod stats;
pub mod store;

pub use dto::{NewRoleDetails, NewUser};
pub use stats::{AssignmentReport, GradeAnalysis, Report, ReportKind, UserStatistics};
pub use store::DataStore;
