//! In-memory record of export attempts.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Sql,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Sql];

    /// Tag written to the export log.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Xlsx => "XLSX",
            Self::Csv => "CSV",
            Self::Sql => "SQL",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLogEntry {
    pub timestamp: DateTime<Local>,
    pub format: ExportFormat,
    pub destination: PathBuf,
    pub success: bool,
}

impl fmt::Display for ExportLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            if self.success { "✅" } else { "❌" },
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.format,
            self.destination.display()
        )
    }
}

/// Append-only; entries are never evicted.
#[derive(Debug, Clone, Default)]
pub struct ExportLog {
    entries: Vec<ExportLogEntry>,
}

impl ExportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, format: ExportFormat, destination: &Path, success: bool) {
        self.entries.push(ExportLogEntry {
            timestamp: Local::now(),
            format,
            destination: destination.to_path_buf(),
            success,
        });
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[ExportLogEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExportLogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_returns_tail_in_order() {
        let mut log = ExportLog::new();
        for i in 0..12 {
            log.record(ExportFormat::Csv, Path::new(&format!("out{}", i)), i % 2 == 0);
        }

        let recent = log.recent(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].destination, PathBuf::from("out2"));
        assert_eq!(recent[9].destination, PathBuf::from("out11"));
        assert_eq!(log.len(), 12);
    }

    #[test]
    fn test_recent_on_short_log() {
        let mut log = ExportLog::new();
        assert!(log.recent(10).is_empty());
        log.record(ExportFormat::Sql, Path::new("schema.sql"), false);
        assert_eq!(log.recent(10).len(), 1);
        assert!(!log.recent(10)[0].success);
    }

    #[test]
    fn test_format_tags() {
        let tags: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.tag()).collect();
        assert_eq!(tags, vec!["XLSX", "CSV", "SQL"]);
    }
}
