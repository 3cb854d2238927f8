//! Export pipeline configuration.
//!
//! # Environment Variables
//!
//! - `EDU_XLSX_PATH`: Workbook file (default: `eduplatform_data.xlsx`)
//! - `EDU_CSV_DIR`: Directory for the CSV file set (default: `csv_exports`)
//! - `EDU_SQL_PATH`: SQL script file (default: `eduplatform_schema.sql`)
//! - `EDU_EXPORT_LOG_LIMIT`: Export log entries shown in the console (default: `10`)

use std::path::PathBuf;

pub const DEFAULT_XLSX_PATH: &str = "eduplatform_data.xlsx";
pub const DEFAULT_CSV_DIR: &str = "csv_exports";
pub const DEFAULT_SQL_PATH: &str = "eduplatform_schema.sql";
pub const DEFAULT_LOG_DISPLAY_LIMIT: usize = 10;

/// Default destinations used by the combined export and offered as
/// defaults in the console prompts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    pub xlsx_path: PathBuf,
    pub csv_dir: PathBuf,
    pub sql_path: PathBuf,
    pub log_display_limit: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            xlsx_path: PathBuf::from(DEFAULT_XLSX_PATH),
            csv_dir: PathBuf::from(DEFAULT_CSV_DIR),
            sql_path: PathBuf::from(DEFAULT_SQL_PATH),
            log_display_limit: DEFAULT_LOG_DISPLAY_LIMIT,
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    /// Falls back to defaults for unset or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            xlsx_path: lookup("EDU_XLSX_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_XLSX_PATH)),
            csv_dir: lookup("EDU_CSV_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_DIR)),
            sql_path: lookup("EDU_SQL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SQL_PATH)),
            log_display_limit: lookup("EDU_EXPORT_LOG_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_DISPLAY_LIMIT),
        }
    }

    /// Returns a copy with all three destinations placed under `dir`,
    /// keeping the configured file names.
    pub fn rooted_at(&self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file_name = |path: &PathBuf, fallback: &str| {
            path.file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(fallback))
        };

        Self {
            xlsx_path: dir.join(file_name(&self.xlsx_path, DEFAULT_XLSX_PATH)),
            csv_dir: dir.join(file_name(&self.csv_dir, DEFAULT_CSV_DIR)),
            sql_path: dir.join(file_name(&self.sql_path, DEFAULT_SQL_PATH)),
            log_display_limit: self.log_display_limit,
        }
    }
}
