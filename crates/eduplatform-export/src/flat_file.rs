//! CSV export: one file per table inside a directory.

use std::fs;
use std::path::Path;

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::log::ExportFormat;
use crate::rows::{ExportSnapshot, TableRow};

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    /// Creates `destination` if needed. Stops at the first failing file.
    fn export(&self, snapshot: &ExportSnapshot, destination: &Path) -> Result<(), ExportError> {
        fs::create_dir_all(destination)?;

        write_table(destination, &snapshot.users)?;
        write_table(destination, &snapshot.students)?;
        write_table(destination, &snapshot.teachers)?;
        write_table(destination, &snapshot.assignments)?;
        Ok(())
    }
}

fn write_table<R: TableRow>(dir: &Path, rows: &[R]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(dir.join(R::FILE_NAME))?;
    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.write_record(row.cells().iter().map(|c| c.render()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::TeacherRow;

    #[test]
    fn test_creates_directory_and_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("csv");
        let snapshot = ExportSnapshot {
            teachers: vec![TeacherRow {
                user_id: 2,
                subjects: "Mathematics, Physics".to_string(),
                classes: "9-A".to_string(),
                workload: 20,
            }],
            ..Default::default()
        };

        CsvExporter.export(&snapshot, &out).unwrap();
        for name in ["users.csv", "students.csv", "teachers.csv", "assignments.csv"] {
            assert!(out.join(name).is_file(), "{} missing", name);
        }

        let mut reader = csv::Reader::from_path(out.join("teachers.csv")).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), TeacherRow::HEADERS);
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][1], "Mathematics, Physics");
    }

    #[test]
    fn test_destination_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(CsvExporter.export(&ExportSnapshot::default(), file.path()).is_err());
    }
}
