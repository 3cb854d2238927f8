//! Assignments published by teachers.
//!
//! An [`Assignment`] is owned by the store; the publishing teacher only keeps
//! its id. Submissions are accepted up to and including the deadline, and
//! grades must be valid [`Score`]s.

use anyhow::anyhow;
use chrono::{Local, NaiveDateTime};
use eduplatform_core::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::grades::Score;
use crate::ids::{AssignmentId, UserId};

/// Format accepted for deadlines typed at the console.
pub const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Format used when deadlines are written to exports.
pub const DEADLINE_EXPORT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a `YYYY-MM-DD HH:MM` deadline.
pub fn parse_deadline(input: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(input.trim(), DEADLINE_INPUT_FORMAT).map_err(|_| {
        AppError::validation(anyhow!(
            "Invalid date format {:?}, expected YYYY-MM-DD HH:MM",
            input.trim()
        ))
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(format!("{:?} is not a valid difficulty.", s)),
        }
    }
}

/// Fields a teacher supplies when publishing an assignment.
#[derive(Debug, Clone, Validate)]
pub struct NewAssignment {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Class ID is required"))]
    pub class_id: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub subject: String,
    pub teacher_id: UserId,
    pub class_id: String,
    pub difficulty: Difficulty,
    pub submissions: BTreeMap<UserId, String>,
    pub grades: BTreeMap<UserId, Score>,
}

/// Counters shown in the teacher's assignment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentStatus {
    pub id: AssignmentId,
    pub title: String,
    pub submissions: usize,
    pub graded: usize,
    pub deadline: NaiveDateTime,
}

impl Assignment {
    pub fn new(id: AssignmentId, teacher_id: UserId, draft: NewAssignment) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            deadline: draft.deadline,
            subject: draft.subject,
            teacher_id,
            class_id: draft.class_id,
            difficulty: draft.difficulty,
            submissions: BTreeMap::new(),
            grades: BTreeMap::new(),
        }
    }

    pub fn is_open_at(&self, now: NaiveDateTime) -> bool {
        now <= self.deadline
    }

    /// Records a submission against the local wall clock.
    pub fn add_submission(&mut self, student_id: UserId, content: &str) -> Result<(), AppError> {
        self.add_submission_at(student_id, content, Local::now().naive_local())
    }

    /// Records a submission made at `now`. Anything after the deadline is
    /// rejected outright; a resubmission before it replaces the content.
    pub fn add_submission_at(
        &mut self,
        student_id: UserId,
        content: &str,
        now: NaiveDateTime,
    ) -> Result<(), AppError> {
        if !self.is_open_at(now) {
            return Err(AppError::validation(anyhow!(
                "Assignment {} closed at {}",
                self.id,
                self.deadline.format(DEADLINE_INPUT_FORMAT)
            )));
        }
        self.submissions.insert(student_id, content.to_string());
        Ok(())
    }

    pub fn set_grade(&mut self, student_id: UserId, value: i64) -> Result<Score, AppError> {
        let score = Score::new(value)?;
        self.grades.insert(student_id, score);
        Ok(score)
    }

    pub fn has_submission_from(&self, student_id: UserId) -> bool {
        self.submissions.contains_key(&student_id)
    }

    pub fn status(&self) -> AssignmentStatus {
        AssignmentStatus {
            id: self.id,
            title: self.title.clone(),
            submissions: self.submissions.len(),
            graded: self.grades.len(),
            deadline: self.deadline,
        }
    }
}
