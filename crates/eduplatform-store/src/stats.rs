//! Aggregate reports over the store.

use anyhow::anyhow;
use eduplatform_core::{AppError, permissions};
use eduplatform_models::{Role, Score, UserId, grades};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::store::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStatistics {
    pub total: usize,
    pub students: usize,
    pub teachers: usize,
    pub parents: usize,
    pub admins: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssignmentReport {
    pub total_assignments: usize,
    pub total_submissions: usize,
    pub total_graded: usize,
}

impl AssignmentReport {
    /// Submissions per assignment as a percentage; `None` with no assignments.
    pub fn completion_rate(&self) -> Option<f64> {
        (self.total_assignments > 0)
            .then(|| self.total_submissions as f64 / self.total_assignments as f64 * 100.0)
    }

    /// Graded share of submissions as a percentage, 0 with no submissions.
    pub fn grading_rate(&self) -> f64 {
        if self.total_submissions == 0 {
            return 0.0;
        }
        self.total_graded as f64 / self.total_submissions as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeAnalysis {
    pub count: usize,
    pub average: f64,
    pub highest: Score,
    pub lowest: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Users,
    Assignments,
    Grades,
    System,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Users,
        ReportKind::Assignments,
        ReportKind::Grades,
        ReportKind::System,
    ];
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Users => "User Statistics",
            Self::Assignments => "Assignment Reports",
            Self::Grades => "Grade Analysis",
            Self::System => "System Statistics",
        })
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" => Ok(Self::Users),
            "assignments" => Ok(Self::Assignments),
            "grades" => Ok(Self::Grades),
            "system" => Ok(Self::System),
            _ => Err(format!("{:?} is not a report type.", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Users(UserStatistics),
    Assignments(AssignmentReport),
    Grades { analysis: Option<GradeAnalysis> },
    System {
        users: UserStatistics,
        assignments: AssignmentReport,
        grades: Option<GradeAnalysis>,
        notifications: usize,
    },
}

impl DataStore {
    pub fn user_statistics(&self) -> UserStatistics {
        UserStatistics {
            total: self.user_count(),
            students: self.role_count(Role::Student),
            teachers: self.role_count(Role::Teacher),
            parents: self.role_count(Role::Parent),
            admins: self.role_count(Role::Admin),
        }
    }

    pub fn assignment_report(&self) -> AssignmentReport {
        AssignmentReport {
            total_assignments: self.assignments.len(),
            total_submissions: self.assignments.values().map(|a| a.submissions.len()).sum(),
            total_graded: self.assignments.values().map(|a| a.grades.len()).sum(),
        }
    }

    /// Statistics over every student's grade book. `None` with no grades.
    pub fn grade_analysis(&self) -> Option<GradeAnalysis> {
        let scores: Vec<Score> = self
            .students()
            .filter_map(|u| u.as_student())
            .flat_map(|s| s.all_scores())
            .collect();

        Some(GradeAnalysis {
            count: scores.len(),
            average: grades::mean(&scores),
            highest: scores.iter().max().copied()?,
            lowest: scores.iter().min().copied()?,
        })
    }

    pub fn notification_total(&self) -> usize {
        self.users().map(|u| u.profile.notifications().len()).sum()
    }

    /// Builds a report for an admin holding the `view_reports` permission.
    #[instrument(skip(self))]
    pub fn generate_report(&self, admin_id: UserId, kind: ReportKind) -> Result<Report, AppError> {
        let admin = self
            .user(admin_id)?
            .as_admin()
            .ok_or_else(|| AppError::forbidden(anyhow!("Only administrators can generate reports")))?;
        if !admin.has_permission(permissions::VIEW_REPORTS) {
            return Err(AppError::forbidden(anyhow!("Missing permission {}", permissions::VIEW_REPORTS)));
        }

        let report = match kind {
            ReportKind::Users => Report::Users(self.user_statistics()),
            ReportKind::Assignments => Report::Assignments(self.assignment_report()),
            ReportKind::Grades => Report::Grades {
                analysis: self.grade_analysis(),
            },
            ReportKind::System => Report::System {
                users: self.user_statistics(),
                assignments: self.assignment_report(),
                grades: self.grade_analysis(),
                notifications: self.notification_total(),
            },
        };
        info!(%kind, "Report generated");
        Ok(report)
    }
}
