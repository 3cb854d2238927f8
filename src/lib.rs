//! # EduPlatform
//!
//! An in-memory educational records console. Users log in as a Student,
//! Teacher, Parent or Admin and work through role menus; all state lives in
//! a single [`DataStore`](eduplatform_store::DataStore) for the session and can be exported as an
//! Excel workbook, CSV files or a SQL Server script.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── eduplatform-core/           # AppError, password hashing, permission tags
//! ├── eduplatform-config/         # Environment-driven configuration
//! ├── eduplatform-models/         # Users, assignments, grades, notifications, schedules
//! ├── eduplatform-store/          # DataStore, registration, grading, reports
//! ├── eduplatform-export/         # xlsx / CSV / SQL exporters and export log
//! ├── eduplatform-observability/  # tracing subscriber setup
//! └── eduplatform-cli/            # Console session and seeding
//! ```
//!
//! ## Roles
//!
//! | Role | Can |
//! |------|-----|
//! | Admin | Register users, run reports, export data, link parents, schedule lessons |
//! | Teacher | Create and grade assignments |
//! | Student | Submit assignments, view grades and schedule |
//! | Parent | Follow linked children's grades and assignments |
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run                              # interactive session with demo accounts
//! cargo run -- export --format csv       # seed and export without prompting
//! cargo run -- --extra-students 50 run   # add generated students
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! EDU_XLSX_PATH=eduplatform_data.xlsx
//! EDU_CSV_DIR=csv_exports
//! EDU_SQL_PATH=eduplatform_schema.sql
//! LOG_LEVEL=warn
//! LOG_DIR=logs
//! ```

// Re-export workspace crates for convenience
pub use eduplatform_cli;
pub use eduplatform_config;
pub use eduplatform_core;
pub use eduplatform_export;
pub use eduplatform_models;
pub use eduplatform_observability;
pub use eduplatform_store;
