//! User data models.
//!
//! A [`User`] is a shared [`UserProfile`] plus a [`RoleDetails`] payload
//! holding the role-specific fields. The role is derived from the payload
//! variant, and the payload can only be borrowed as its own variant, so a
//! user's role cannot change after construction.
//!
//! # Core Types
//!
//! - [`UserProfile`] - identity, credentials, contact fields, inbox
//! - [`StudentRecord`], [`TeacherRecord`], [`ParentRecord`], [`AdminRecord`]
//! - [`ProfileView`] - serialisable snapshot of a profile
//! - [`ProfileUpdate`] - validated partial update of contact fields

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use eduplatform_core::{AppError, permissions, verify_password};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{info, warn};
use validator::Validate;

use crate::assignments::{Assignment, NewAssignment};
use crate::grades::{Score, mean};
use crate::ids::{AssignmentId, NotificationId, UserId};
use crate::notifications::{Inbox, Notification, Priority};
use crate::roles::Role;

/// Longest submission a student may hand in, in characters.
pub const MAX_SUBMISSION_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    password_hash: String,
    pub created_at: DateTime<Utc>,
    pub phone: String,
    pub address: String,
    notifications: Inbox,
}

impl UserProfile {
    /// `password_hash` must already be a bcrypt digest.
    pub fn new(
        id: UserId,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
            phone: String::new(),
            address: String::new(),
            notifications: Inbox::new(),
        }
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// A malformed stored hash counts as a mismatch.
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash).unwrap_or_else(|e| {
            warn!(user_id = %self.id, error = %e, "Password verification failed");
            false
        })
    }

    pub fn add_notification(&mut self, message: impl Into<String>, priority: Priority) -> NotificationId {
        let message = message.into();
        info!(user_id = %self.id, %priority, message = %message, "Notification added");
        self.notifications.push(self.id, message, priority)
    }

    /// High priority first, insertion order otherwise.
    pub fn view_notifications(&self) -> Vec<&Notification> {
        self.notifications.sorted()
    }

    pub fn delete_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.remove(id)
    }

    pub fn mark_notification_read(&mut self, id: NotificationId) -> bool {
        self.notifications.mark_as_read(id)
    }

    pub fn notifications(&self) -> &Inbox {
        &self.notifications
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) -> Result<(), AppError> {
        update
            .validate()
            .map_err(|e| AppError::from_validation(&e))?;

        if let Some(full_name) = update.full_name {
            self.full_name = full_name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            self.phone = phone.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = address.trim().to_string();
        }
        Ok(())
    }
}

/// Partial update of the editable profile fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 255, message = "Full name must be 1-255 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

/// Serialisable snapshot of a profile, as shown on the profile screen and
/// written to the Users export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Submitted,
    Graded,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Submitted => "submitted",
            Self::Graded => "graded",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRecord {
    /// Class label such as `"9-A"`.
    pub grade_label: String,
    /// Subject name to teacher id.
    pub subjects: BTreeMap<String, UserId>,
    pub assignment_status: BTreeMap<AssignmentId, SubmissionState>,
    pub grades: BTreeMap<String, Vec<Score>>,
}

impl StudentRecord {
    pub fn new(grade_label: impl Into<String>) -> Self {
        Self {
            grade_label: grade_label.into(),
            ..Default::default()
        }
    }

    pub fn validate_submission(content: &str) -> Result<(), AppError> {
        let length = content.chars().count();
        if length > MAX_SUBMISSION_CHARS {
            return Err(AppError::validation(anyhow!(
                "Assignment content too long ({} characters, max {})",
                length,
                MAX_SUBMISSION_CHARS
            )));
        }
        Ok(())
    }

    /// Marks the assignment as submitted on the student's side only. The
    /// store pairs this with [`Assignment::add_submission_at`].
    pub fn submit_assignment(&mut self, assignment_id: AssignmentId, content: &str) -> Result<(), AppError> {
        Self::validate_submission(content)?;
        self.assignment_status
            .insert(assignment_id, SubmissionState::Submitted);
        Ok(())
    }

    pub fn mark_graded(&mut self, assignment_id: AssignmentId) {
        self.assignment_status
            .insert(assignment_id, SubmissionState::Graded);
    }

    pub fn status_of(&self, assignment_id: AssignmentId) -> Option<SubmissionState> {
        self.assignment_status.get(&assignment_id).copied()
    }

    pub fn record_grade(&mut self, subject: impl Into<String>, score: Score) {
        self.grades.entry(subject.into()).or_default().push(score);
    }

    /// Swaps one occurrence of `previous` in `subject` for `score`. Falls
    /// back to appending when `previous` is not in the grade book.
    pub fn replace_grade(&mut self, subject: impl Into<String>, previous: Score, score: Score) {
        let grades = self.grades.entry(subject.into()).or_default();
        match grades.iter().position(|g| *g == previous) {
            Some(index) => grades[index] = score,
            None => grades.push(score),
        }
    }

    /// All grades, or only `subject` (empty if the student has none there).
    pub fn view_grades(&self, subject: Option<&str>) -> BTreeMap<String, Vec<Score>> {
        match subject {
            Some(subject) => BTreeMap::from([(
                subject.to_string(),
                self.grades.get(subject).cloned().unwrap_or_default(),
            )]),
            None => self.grades.clone(),
        }
    }

    /// Mean grade for `subject`, or across every subject. 0.0 without data.
    pub fn calculate_average_grade(&self, subject: Option<&str>) -> f64 {
        match subject {
            Some(subject) => self.grades.get(subject).map_or(0.0, |g| mean(g)),
            None => mean(&self.all_scores()),
        }
    }

    pub fn all_scores(&self) -> Vec<Score> {
        self.grades.values().flatten().copied().collect()
    }

    pub fn subject_names(&self) -> Vec<&str> {
        self.subjects.keys().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherRecord {
    pub subjects: Vec<String>,
    pub classes: Vec<String>,
    /// Ids of assignments this teacher published; the store holds the data.
    pub assignments: BTreeSet<AssignmentId>,
    /// Teaching hours per week.
    pub workload: u32,
}

impl TeacherRecord {
    pub fn new(subjects: Vec<String>) -> Self {
        Self {
            subjects,
            ..Default::default()
        }
    }

    /// Builds the assignment for a store-issued `id` and takes ownership of
    /// the id. The caller stores the returned assignment.
    pub fn create_assignment(
        &mut self,
        id: AssignmentId,
        teacher_id: UserId,
        draft: NewAssignment,
    ) -> Result<Assignment, AppError> {
        draft
            .validate()
            .map_err(|e| AppError::from_validation(&e))?;
        self.assignments.insert(id);
        Ok(Assignment::new(id, teacher_id, draft))
    }

    pub fn owns(&self, assignment_id: AssignmentId) -> bool {
        self.assignments.contains(&assignment_id)
    }

    /// Grades a student on one of this teacher's assignments.
    pub fn grade_assignment(
        &self,
        assignment: &mut Assignment,
        student_id: UserId,
        value: i64,
    ) -> Result<Score, AppError> {
        if !self.owns(assignment.id) {
            return Err(AppError::not_found(anyhow!(
                "Assignment {} not found among your assignments",
                assignment.id
            )));
        }
        assignment.set_grade(student_id, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub grade_alerts: bool,
    pub assignment_due: bool,
    pub attendance: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            grade_alerts: true,
            assignment_due: true,
            attendance: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentRecord {
    /// Student ids; not guaranteed to resolve in the store.
    pub children: Vec<UserId>,
    pub notification_preferences: NotificationPreferences,
}

impl ParentRecord {
    /// Adds a child once; returns false if already linked.
    pub fn add_child(&mut self, student_id: UserId) -> bool {
        if self.has_child(student_id) {
            return false;
        }
        self.children.push(student_id);
        true
    }

    pub fn has_child(&self, student_id: UserId) -> bool {
        self.children.contains(&student_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    pub permissions: Vec<String>,
}

impl Default for AdminRecord {
    fn default() -> Self {
        Self {
            permissions: permissions::ADMIN_DEFAULTS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl AdminRecord {
    pub fn has_permission(&self, tag: &str) -> bool {
        self.permissions.iter().any(|p| p == tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleDetails {
    Student(StudentRecord),
    Teacher(TeacherRecord),
    Parent(ParentRecord),
    Admin(AdminRecord),
}

impl RoleDetails {
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Teacher(_) => Role::Teacher,
            Self::Parent(_) => Role::Parent,
            Self::Admin(_) => Role::Admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub profile: UserProfile,
    details: RoleDetails,
}

impl User {
    pub fn new(profile: UserProfile, details: RoleDetails) -> Self {
        Self { profile, details }
    }

    pub fn student(profile: UserProfile, record: StudentRecord) -> Self {
        Self::new(profile, RoleDetails::Student(record))
    }

    pub fn teacher(profile: UserProfile, record: TeacherRecord) -> Self {
        Self::new(profile, RoleDetails::Teacher(record))
    }

    pub fn parent(profile: UserProfile, record: ParentRecord) -> Self {
        Self::new(profile, RoleDetails::Parent(record))
    }

    pub fn admin(profile: UserProfile) -> Self {
        Self::new(profile, RoleDetails::Admin(AdminRecord::default()))
    }

    pub fn id(&self) -> UserId {
        self.profile.id
    }

    pub fn role(&self) -> Role {
        self.details.role()
    }

    pub fn details(&self) -> &RoleDetails {
        &self.details
    }

    pub fn as_student(&self) -> Option<&StudentRecord> {
        match &self.details {
            RoleDetails::Student(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut StudentRecord> {
        match &mut self.details {
            RoleDetails::Student(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&TeacherRecord> {
        match &self.details {
            RoleDetails::Teacher(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_teacher_mut(&mut self) -> Option<&mut TeacherRecord> {
        match &mut self.details {
            RoleDetails::Teacher(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_parent(&self) -> Option<&ParentRecord> {
        match &self.details {
            RoleDetails::Parent(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_parent_mut(&mut self) -> Option<&mut ParentRecord> {
        match &mut self.details {
            RoleDetails::Parent(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_admin(&self) -> Option<&AdminRecord> {
        match &self.details {
            RoleDetails::Admin(a) => Some(a),
            _ => None,
        }
    }

    pub fn view_profile(&self) -> ProfileView {
        ProfileView {
            id: self.profile.id,
            full_name: self.profile.full_name.clone(),
            email: self.profile.email.clone(),
            role: self.role(),
            created_at: self.profile.created_at,
            phone: self.profile.phone.clone(),
            address: self.profile.address.clone(),
        }
    }

    /// Delivers a high-priority alert about `child_id`. Only parents receive
    /// these; for any other role nothing is added.
    pub fn receive_child_notification(&mut self, child_id: UserId, message: &str) -> Option<NotificationId> {
        self.as_parent()?;
        Some(
            self.profile
                .add_notification(format!("Child {}: {}", child_id, message), Priority::High),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignments::{Difficulty, parse_deadline};
    use eduplatform_core::ErrorKind;

    fn profile(id: u64) -> UserProfile {
        UserProfile::new(UserId::new(id), "Alice Adam", "alice@edu.com", "not-a-hash")
    }

    fn score(value: i64) -> Score {
        Score::new(value).unwrap()
    }

    fn graded_student() -> StudentRecord {
        let mut student = StudentRecord::new("9-A");
        for v in [4, 5, 4] {
            student.record_grade("Math", score(v));
        }
        for v in [5, 4, 5] {
            student.record_grade("Physics", score(v));
        }
        student
    }

    fn draft() -> NewAssignment {
        NewAssignment {
            title: "Essay".to_string(),
            description: String::new(),
            deadline: parse_deadline("2030-01-01 00:00").unwrap(),
            subject: "Literature".to_string(),
            class_id: "9-A".to_string(),
            difficulty: Difficulty::Hard,
        }
    }

    #[test]
    fn test_average_grade_overall_and_per_subject() {
        let student = graded_student();
        assert_eq!(student.calculate_average_grade(None), 4.5);
        let math = student.calculate_average_grade(Some("Math"));
        assert!((math - 4.333_333_333_333_333).abs() < 1e-9);
        assert_eq!(student.calculate_average_grade(Some("History")), 0.0);
        assert_eq!(StudentRecord::new("9-A").calculate_average_grade(None), 0.0);
    }

    #[test]
    fn test_view_grades_filtered() {
        let student = graded_student();
        let math = student.view_grades(Some("Math"));
        assert_eq!(math.len(), 1);
        assert_eq!(math["Math"].len(), 3);

        let missing = student.view_grades(Some("Art"));
        assert!(missing["Art"].is_empty());
        assert_eq!(student.view_grades(None).len(), 2);
    }

    #[test]
    fn test_replace_grade_swaps_one_occurrence() {
        let mut student = graded_student();
        student.replace_grade("Math", score(4), score(2));
        assert_eq!(student.grades["Math"], vec![score(2), score(5), score(4)]);

        student.replace_grade("Art", score(3), score(5));
        assert_eq!(student.grades["Art"], vec![score(5)]);
    }

    #[test]
    fn test_submit_assignment_length_ceiling() {
        let mut student = StudentRecord::new("9-A");
        let at_limit = "a".repeat(MAX_SUBMISSION_CHARS);
        let over_limit = "a".repeat(MAX_SUBMISSION_CHARS + 1);

        assert!(student.submit_assignment(AssignmentId::new(1), &at_limit).is_ok());
        let err = student
            .submit_assignment(AssignmentId::new(2), &over_limit)
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(student.status_of(AssignmentId::new(1)), Some(SubmissionState::Submitted));
        assert_eq!(student.status_of(AssignmentId::new(2)), None);
    }

    #[test]
    fn test_submission_limit_counts_characters_not_bytes() {
        let content = "é".repeat(MAX_SUBMISSION_CHARS);
        assert!(StudentRecord::validate_submission(&content).is_ok());
    }

    #[test]
    fn test_teacher_grades_only_owned_assignments() {
        let mut teacher = TeacherRecord::new(vec!["Literature".to_string()]);
        let mut owned = teacher
            .create_assignment(AssignmentId::new(1), UserId::new(2), draft())
            .unwrap();
        let mut foreign = Assignment::new(AssignmentId::new(2), UserId::new(9), draft());

        assert!(teacher.grade_assignment(&mut owned, UserId::new(3), 5).is_ok());
        let err = teacher
            .grade_assignment(&mut foreign, UserId::new(3), 5)
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
        assert!(foreign.grades.is_empty());

        let err = teacher
            .grade_assignment(&mut owned, UserId::new(3), 7)
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(owned.grades[&UserId::new(3)].value(), 5);
    }

    #[test]
    fn test_role_is_derived_from_details() {
        let user = User::student(profile(3), StudentRecord::new("9-A"));
        assert_eq!(user.role(), Role::Student);
        assert!(user.as_teacher().is_none());
        assert!(User::admin(profile(1)).as_admin().is_some());
    }

    #[test]
    fn test_admin_has_default_permissions() {
        let admin = AdminRecord::default();
        assert_eq!(admin.permissions.len(), 5);
        assert!(admin.has_permission(permissions::DATA_EXPORT));
        assert!(!admin.has_permission("delete_everything"));
    }

    #[test]
    fn test_parent_children_are_unique() {
        let mut parent = ParentRecord::default();
        assert!(parent.add_child(UserId::new(3)));
        assert!(!parent.add_child(UserId::new(3)));
        assert_eq!(parent.children, vec![UserId::new(3)]);
        assert!(parent.notification_preferences.grade_alerts);
    }

    #[test]
    fn test_child_notification_only_for_parents() {
        let mut parent = User::parent(profile(4), ParentRecord::default());
        let mut student = User::student(profile(3), StudentRecord::new("9-A"));

        assert!(parent.receive_child_notification(UserId::new(3), "New grade").is_some());
        assert!(student.receive_child_notification(UserId::new(3), "New grade").is_none());

        let notes = parent.profile.view_notifications();
        assert_eq!(notes[0].message, "Child 3: New grade");
        assert_eq!(notes[0].priority, Priority::High);
    }

    #[test]
    fn test_apply_update_validates() {
        let mut p = profile(1);
        let too_long = ProfileUpdate {
            phone: Some("1".repeat(21)),
            ..Default::default()
        };
        assert!(p.apply_update(too_long).is_err());
        assert_eq!(p.phone, "");

        let update = ProfileUpdate {
            phone: Some(" +998 90 123 45 67 ".to_string()),
            address: Some("Tashkent".to_string()),
            ..Default::default()
        };
        assert!(p.apply_update(update).is_ok());
        assert_eq!(p.phone, "+998 90 123 45 67");
        assert_eq!(p.address, "Tashkent");
        assert_eq!(p.full_name, "Alice Adam");
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!profile(1).verify_password("anything"));
    }
}
