//! Scores and grade records.

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use eduplatform_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AssignmentId, GradeId, UserId};

/// A grade value, guaranteed to lie in [`Score::MIN`]..=[`Score::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, AppError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AppError::validation(anyhow!(
                "Grade must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value).map_err(|e| e.to_string())
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arithmetic mean of `scores`, or 0.0 for an empty slice.
pub fn mean(scores: &[Score]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u32 = scores.iter().map(|s| u32::from(s.value())).sum();
    f64::from(total) / scores.len() as f64
}

/// A grade given by a teacher, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: GradeId,
    pub student_id: UserId,
    pub subject: String,
    pub value: Score,
    pub date: DateTime<Utc>,
    pub teacher_id: UserId,
    pub comment: String,
    pub assignment_id: Option<AssignmentId>,
}

impl GradeRecord {
    pub fn new(
        id: GradeId,
        student_id: UserId,
        subject: impl Into<String>,
        value: Score,
        teacher_id: UserId,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id,
            student_id,
            subject: subject.into(),
            value,
            date: Utc::now(),
            teacher_id,
            comment: comment.into(),
            assignment_id: None,
        }
    }

    pub fn for_assignment(mut self, assignment_id: AssignmentId) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }

    /// Replaces the value; out-of-range input leaves the record unchanged.
    pub fn update_grade(&mut self, value: i64) -> Result<(), AppError> {
        self.value = Score::new(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduplatform_core::ErrorKind;

    fn scores(values: &[i64]) -> Vec<Score> {
        values.iter().map(|v| Score::new(*v).unwrap()).collect()
    }

    #[test]
    fn test_score_accepts_only_one_to_five() {
        for value in 1..=5 {
            assert_eq!(Score::new(value).unwrap().value() as i64, value);
        }
        for value in [-1, 0, 6, 100] {
            let err = Score::new(value).unwrap_err();
            assert!(err.is(ErrorKind::Validation));
        }
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&scores(&[4, 5, 4, 5, 4, 5])), 4.5);
        assert!((mean(&scores(&[4, 5, 4])) - 13.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_grade_rejects_out_of_range() {
        let mut record = GradeRecord::new(
            GradeId::new(1),
            UserId::new(3),
            "Mathematics",
            Score::new(4).unwrap(),
            UserId::new(2),
            "",
        );
        assert!(record.update_grade(9).is_err());
        assert_eq!(record.value.value(), 4);
        assert!(record.update_grade(2).is_ok());
        assert_eq!(record.value.value(), 2);
    }

    #[test]
    fn test_score_deserialization_validates() {
        let ok: Score = serde_json::from_str("3").unwrap();
        assert_eq!(ok.value(), 3);
        assert!(serde_json::from_str::<Score>("7").is_err());
    }
}
