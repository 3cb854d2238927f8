//! # EduPlatform Export
//!
//! Writes a snapshot of the [`DataStore`](eduplatform_store::DataStore) as
//! an Excel workbook, a directory of CSV files or a SQL Server script.
//!
//! Every format implements [`Exporter`]; [`ExportManager`] runs them,
//! catches failures and keeps the session's [`ExportLog`].
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_config::ExportConfig;
//! use eduplatform_export::ExportManager;
//!
//! let mut exports = ExportManager::new(ExportConfig::default());
//! if !exports.export_all(&store) {
//!     eprintln!("some exports failed");
//! }
//! for entry in exports.log().recent(10) {
//!     println!("{}", entry);
//! }
//! ```

pub mod error;
pub mod exporter;
pub mod flat_file;
pub mod log;
pub mod manager;
pub mod rows;
pub mod sql_script;
pub mod workbook;

pub use error::ExportError;
pub use exporter::Exporter;
pub use flat_file::CsvExporter;
pub use log::{ExportFormat, ExportLog, ExportLogEntry};
pub use manager::{ExportManager, exporter_for};
pub use rows::ExportSnapshot;
pub use sql_script::SqlExporter;
pub use workbook::WorkbookExporter;
