//! SQL Server schema script: DDL for the four tables followed by one
//! `INSERT` per row.

use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::exporter::Exporter;
use crate::log::ExportFormat;
use crate::rows::ExportSnapshot;

const SCHEMA: &str = "\
-- Create Users table
CREATE TABLE Users
(
    ID           INT PRIMARY KEY,
    FullName     NVARCHAR(255) NOT NULL,
    Email        NVARCHAR(255) UNIQUE NOT NULL,
    PasswordHash NVARCHAR(255) NOT NULL,
    Role         NVARCHAR(50) NOT NULL,
    CreatedAt    DATETIME2 NOT NULL,
    Phone        NVARCHAR(20),
    Address      NVARCHAR(500)
);

-- Create Students table
CREATE TABLE Students
(
    UserID       INT PRIMARY KEY,
    Grade        NVARCHAR(10) NOT NULL,
    Subjects     NVARCHAR(MAX),
    AverageGrade FLOAT,
    FOREIGN KEY (UserID) REFERENCES Users (ID)
);

-- Create Teachers table
CREATE TABLE Teachers
(
    UserID   INT PRIMARY KEY,
    Subjects NVARCHAR(MAX),
    Classes  NVARCHAR(MAX),
    Workload INT DEFAULT 0,
    FOREIGN KEY (UserID) REFERENCES Users (ID)
);

-- Create Assignments table
CREATE TABLE Assignments
(
    ID              INT PRIMARY KEY,
    Title           NVARCHAR(255) NOT NULL,
    Description     NVARCHAR(MAX),
    Subject         NVARCHAR(100) NOT NULL,
    TeacherID       INT       NOT NULL,
    ClassID         NVARCHAR(50) NOT NULL,
    Deadline        DATETIME2 NOT NULL,
    Difficulty      NVARCHAR(20) DEFAULT 'medium',
    SubmissionCount INT DEFAULT 0,
    GradeCount      INT DEFAULT 0,
    FOREIGN KEY (TeacherID) REFERENCES Users (ID)
);
";

/// Quotes `value` as a Unicode string literal, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("N'{}'", value.replace('\'', "''"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlExporter;

impl Exporter for SqlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Sql
    }

    fn export(&self, snapshot: &ExportSnapshot, destination: &Path) -> Result<(), ExportError> {
        let mut out = BufWriter::new(File::create(destination)?);
        write_script(&mut out, snapshot)?;
        out.flush()?;
        Ok(())
    }
}

pub fn write_script<W: Write>(out: &mut W, snapshot: &ExportSnapshot) -> std::io::Result<()> {
    writeln!(out, "-- EduPlatform Database Schema for SQL Server")?;
    writeln!(out, "-- Generated on: {}", Local::now().format("%Y-%m-%dT%H:%M:%S"))?;
    writeln!(out)?;
    out.write_all(SCHEMA.as_bytes())?;

    writeln!(out, "\n-- Insert Users data")?;
    for u in &snapshot.users {
        writeln!(
            out,
            "INSERT INTO Users VALUES ({}, {}, {}, {}, {}, '{}', {}, {});",
            u.id,
            quote(&u.full_name),
            quote(&u.email),
            quote(&u.password_hash),
            quote(&u.role),
            u.created_at_text(),
            quote(&u.phone),
            quote(&u.address)
        )?;
    }

    writeln!(out, "\n-- Insert Students data")?;
    for s in &snapshot.students {
        writeln!(
            out,
            "INSERT INTO Students VALUES ({}, {}, {}, {});",
            s.user_id,
            quote(&s.grade),
            quote(&s.subjects),
            s.average_grade
        )?;
    }

    writeln!(out, "\n-- Insert Teachers data")?;
    for t in &snapshot.teachers {
        writeln!(
            out,
            "INSERT INTO Teachers VALUES ({}, {}, {}, {});",
            t.user_id,
            quote(&t.subjects),
            quote(&t.classes),
            t.workload
        )?;
    }

    writeln!(out, "\n-- Insert Assignments data")?;
    for a in &snapshot.assignments {
        writeln!(
            out,
            "INSERT INTO Assignments VALUES ({}, {}, {}, {}, {}, {}, '{}', {}, {}, {});",
            a.id,
            quote(&a.title),
            quote(&a.description),
            quote(&a.subject),
            a.teacher_id,
            quote(&a.class_id),
            a.deadline,
            quote(&a.difficulty),
            a.submissions,
            a.grades
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{AssignmentRow, StudentRow};

    fn render(snapshot: &ExportSnapshot) -> String {
        let mut buf = Vec::new();
        write_script(&mut buf, snapshot).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_quote_doubles_single_quotes() {
        assert_eq!(quote("O'Brien"), "N'O''Brien'");
        assert_eq!(quote(""), "N''");
    }

    #[test]
    fn test_script_contains_schema_and_rows() {
        let snapshot = ExportSnapshot {
            students: vec![StudentRow {
                user_id: 3,
                grade: "9-A".to_string(),
                subjects: "Mathematics, Physics".to_string(),
                average_grade: 4.5,
            }],
            ..Default::default()
        };
        let script = render(&snapshot);

        assert!(script.starts_with("-- EduPlatform Database Schema for SQL Server\n"));
        for table in ["Users", "Students", "Teachers", "Assignments"] {
            assert!(script.contains(&format!("CREATE TABLE {}\n", table)));
        }
        assert!(script.contains("INSERT INTO Students VALUES (3, N'9-A', N'Mathematics, Physics', 4.5);"));
    }

    #[test]
    fn test_embedded_quotes_cannot_break_out() {
        let snapshot = ExportSnapshot {
            assignments: vec![AssignmentRow {
                id: 1,
                title: "Robert'); DROP TABLE Users;--".to_string(),
                description: String::new(),
                subject: "CS".to_string(),
                teacher_id: 2,
                class_id: "9-A".to_string(),
                deadline: "2030-01-01T00:00:00".to_string(),
                difficulty: "medium".to_string(),
                submissions: 0,
                grades: 0,
            }],
            ..Default::default()
        };
        let script = render(&snapshot);
        assert!(script.contains("N'Robert''); DROP TABLE Users;--'"));
    }
}
