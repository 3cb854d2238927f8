//! Point-in-time table rows taken from the store.
//!
//! Every exporter renders the same four tables from an [`ExportSnapshot`],
//! so header names and cell values are defined once here.

use chrono::{DateTime, Utc};
use eduplatform_models::{DEADLINE_EXPORT_FORMAT, User};
use eduplatform_store::DataStore;

/// Separator for multi-valued fields such as subject lists.
pub const LIST_SEPARATOR: &str = ", ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A typed cell. Numbers stay numeric in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<usize> for Cell {
    fn from(n: usize) -> Self {
        Self::Integer(n as u64)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Self::Integer(u64::from(n))
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

/// One row of an exported table.
pub trait TableRow {
    /// Sheet name in the workbook.
    const TABLE: &'static str;
    /// File name in the CSV directory.
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    /// Only the SQL script carries the hash.
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub phone: String,
    pub address: String,
}

impl UserRow {
    pub fn created_at_text(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl TableRow for UserRow {
    const TABLE: &'static str = "Users";
    const FILE_NAME: &'static str = "users.csv";
    const HEADERS: &'static [&'static str] =
        &["ID", "Full Name", "Email", "Role", "Created At", "Phone", "Address"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.id.into(),
            self.full_name.as_str().into(),
            self.email.as_str().into(),
            self.role.as_str().into(),
            self.created_at_text().into(),
            self.phone.as_str().into(),
            self.address.as_str().into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub user_id: u64,
    pub grade: String,
    pub subjects: String,
    pub average_grade: f64,
}

impl TableRow for StudentRow {
    const TABLE: &'static str = "Students";
    const FILE_NAME: &'static str = "students.csv";
    const HEADERS: &'static [&'static str] = &["User ID", "Grade", "Subjects", "Average Grade"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.user_id.into(),
            self.grade.as_str().into(),
            self.subjects.as_str().into(),
            self.average_grade.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherRow {
    pub user_id: u64,
    pub subjects: String,
    pub classes: String,
    pub workload: u32,
}

impl TableRow for TeacherRow {
    const TABLE: &'static str = "Teachers";
    const FILE_NAME: &'static str = "teachers.csv";
    const HEADERS: &'static [&'static str] = &["User ID", "Subjects", "Classes", "Workload"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.user_id.into(),
            self.subjects.as_str().into(),
            self.classes.as_str().into(),
            self.workload.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub id: u64,
    pub title: String,
    /// Only the SQL script carries the description.
    pub description: String,
    pub subject: String,
    pub teacher_id: u64,
    pub class_id: String,
    pub deadline: String,
    pub difficulty: String,
    pub submissions: usize,
    pub grades: usize,
}

impl TableRow for AssignmentRow {
    const TABLE: &'static str = "Assignments";
    const FILE_NAME: &'static str = "assignments.csv";
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Title",
        "Subject",
        "Teacher ID",
        "Class ID",
        "Deadline",
        "Difficulty",
        "Submissions",
        "Grades",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            self.id.into(),
            self.title.as_str().into(),
            self.subject.as_str().into(),
            self.teacher_id.into(),
            self.class_id.as_str().into(),
            self.deadline.as_str().into(),
            self.difficulty.as_str().into(),
            self.submissions.into(),
            self.grades.into(),
        ]
    }
}

/// Read-only copy of everything an export writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSnapshot {
    pub users: Vec<UserRow>,
    pub students: Vec<StudentRow>,
    pub teachers: Vec<TeacherRow>,
    pub assignments: Vec<AssignmentRow>,
}

impl ExportSnapshot {
    pub fn capture(store: &DataStore) -> Self {
        Self {
            users: store.users().map(user_row).collect(),
            students: store.students().filter_map(student_row).collect(),
            teachers: store.teachers().filter_map(teacher_row).collect(),
            assignments: store
                .assignments()
                .map(|a| AssignmentRow {
                    id: a.id.get(),
                    title: a.title.clone(),
                    description: a.description.clone(),
                    subject: a.subject.clone(),
                    teacher_id: a.teacher_id.get(),
                    class_id: a.class_id.clone(),
                    deadline: a.deadline.format(DEADLINE_EXPORT_FORMAT).to_string(),
                    difficulty: a.difficulty.to_string(),
                    submissions: a.submissions.len(),
                    grades: a.grades.len(),
                })
                .collect(),
        }
    }
}

fn user_row(user: &User) -> UserRow {
    let profile = &user.profile;
    UserRow {
        id: profile.id.get(),
        full_name: profile.full_name.clone(),
        email: profile.email.clone(),
        password_hash: profile.password_hash().to_string(),
        role: user.role().to_string(),
        created_at: profile.created_at,
        phone: profile.phone.clone(),
        address: profile.address.clone(),
    }
}

fn student_row(user: &User) -> Option<StudentRow> {
    let student = user.as_student()?;
    Some(StudentRow {
        user_id: user.id().get(),
        grade: student.grade_label.clone(),
        subjects: student.subject_names().join(LIST_SEPARATOR),
        average_grade: student.calculate_average_grade(None),
    })
}

fn teacher_row(user: &User) -> Option<TeacherRow> {
    let teacher = user.as_teacher()?;
    Some(TeacherRow {
        user_id: user.id().get(),
        subjects: teacher.subjects.join(LIST_SEPARATOR),
        classes: teacher.classes.join(LIST_SEPARATOR),
        workload: teacher.workload,
    })
}
