use anyhow::anyhow;
use chrono::{NaiveDateTime, Utc};
use eduplatform_core::{AppError, hash_password};
use eduplatform_models::{
    Assignment, AssignmentId, GradeId, GradeRecord, IdSequence, NewAssignment, NotificationId,
    ParentRecord, Priority, ProfileUpdate, Role, Schedule, ScheduleId, Score, StudentRecord,
    TeacherRecord, User, UserId, UserProfile,
};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{NewRoleDetails, NewUser};

/// Message shared by every failed login, whatever the cause.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Authoritative in-memory store for one session.
///
/// Users live in a single id-keyed map with one id index per role.
/// Assignments are keyed by a store-wide id; teachers only record which ids
/// they own.
#[derive(Debug, Default)]
pub struct DataStore {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) students: BTreeSet<UserId>,
    pub(crate) teachers: BTreeSet<UserId>,
    pub(crate) parents: BTreeSet<UserId>,
    pub(crate) admins: BTreeSet<UserId>,
    pub(crate) assignments: BTreeMap<AssignmentId, Assignment>,
    pub(crate) grade_records: Vec<GradeRecord>,
    pub(crate) schedules: BTreeMap<ScheduleId, Schedule>,
    user_ids: IdSequence,
    assignment_ids: IdSequence,
    grade_ids: IdSequence,
    schedule_ids: IdSequence,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next user id. Ids are never handed out twice.
    pub fn next_id(&mut self) -> UserId {
        self.user_ids.next_id()
    }

    fn role_index_mut(&mut self, role: Role) -> &mut BTreeSet<UserId> {
        match role {
            Role::Student => &mut self.students,
            Role::Teacher => &mut self.teachers,
            Role::Parent => &mut self.parents,
            Role::Admin => &mut self.admins,
        }
    }

    fn role_index(&self, role: Role) -> &BTreeSet<UserId> {
        match role {
            Role::Student => &self.students,
            Role::Teacher => &self.teachers,
            Role::Parent => &self.parents,
            Role::Admin => &self.admins,
        }
    }

    /// Inserts a user under its own id and indexes it by role. No email
    /// uniqueness check happens here; see [`DataStore::register_user`].
    pub fn add_user(&mut self, user: User) -> UserId {
        let id = user.id();
        if let Some(previous) = self.users.remove(&id) {
            self.role_index_mut(previous.role()).remove(&id);
        }
        self.role_index_mut(user.role()).insert(id);
        self.users.insert(id, user);
        id
    }

    /// Validates, hashes and stores a new user. Emails must be unique.
    #[instrument(skip(self, dto), fields(email = %dto.email, role = %dto.details.role()))]
    pub fn register_user(&mut self, dto: NewUser) -> Result<UserId, AppError> {
        dto.validate().map_err(|e| AppError::from_validation(&e))?;

        if let NewRoleDetails::Student { grade_label } = &dto.details {
            if grade_label.trim().is_empty() {
                return Err(AppError::validation(anyhow!("Grade is required for students")));
            }
        }

        if self.find_user_by_email(&dto.email).is_some() {
            warn!("Registration rejected, email already in use");
            return Err(AppError::conflict(anyhow!(
                "User with email {} already exists",
                dto.email
            )));
        }

        let password_hash = hash_password(&dto.password)?;
        let id = self.next_id();
        let profile = UserProfile::new(id, dto.full_name, dto.email, password_hash);

        let user = match dto.details {
            NewRoleDetails::Student { grade_label } => {
                User::student(profile, StudentRecord::new(grade_label.trim()))
            }
            NewRoleDetails::Teacher {
                subjects,
                classes,
                workload,
            } => {
                let mut record = TeacherRecord::new(non_blank(subjects));
                record.classes = non_blank(classes);
                record.workload = workload;
                User::teacher(profile, record)
            }
            NewRoleDetails::Parent => User::parent(profile, ParentRecord::default()),
            NewRoleDetails::Admin => User::admin(profile),
        };

        self.add_user(user);
        info!(user_id = %id, "User registered");
        Ok(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.profile.email == email)
    }

    /// Unknown email and wrong password fail with the same error.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, email: &str, password: &str) -> Result<&User, AppError> {
        let user = self
            .find_user_by_email(email.trim())
            .ok_or_else(|| AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)))?;

        if !user.profile.verify_password(password) {
            warn!("Login failed");
            return Err(AppError::unauthorized(anyhow!(INVALID_CREDENTIALS)));
        }

        info!(user_id = %user.id(), "User logged in");
        Ok(user)
    }

    pub fn user(&self, id: UserId) -> Result<&User, AppError> {
        self.users
            .get(&id)
            .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", id)))
    }

    pub fn user_mut(&mut self, id: UserId) -> Result<&mut User, AppError> {
        self.users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(anyhow!("User {} not found", id)))
    }

    /// Every user in id order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn users_with_role(&self, role: Role) -> impl Iterator<Item = &User> + '_ {
        self.role_index(role)
            .iter()
            .filter_map(|id| self.users.get(id))
    }

    pub fn role_count(&self, role: Role) -> usize {
        self.role_index(role).len()
    }

    pub fn students(&self) -> impl Iterator<Item = &User> + '_ {
        self.users_with_role(Role::Student)
    }

    pub fn teachers(&self) -> impl Iterator<Item = &User> + '_ {
        self.users_with_role(Role::Teacher)
    }

    pub fn parents(&self) -> impl Iterator<Item = &User> + '_ {
        self.users_with_role(Role::Parent)
    }

    pub fn admins(&self) -> impl Iterator<Item = &User> + '_ {
        self.users_with_role(Role::Admin)
    }

    pub fn student(&self, id: UserId) -> Result<&StudentRecord, AppError> {
        self.users
            .get(&id)
            .and_then(User::as_student)
            .ok_or_else(|| AppError::not_found(anyhow!("Student {} not found", id)))
    }

    pub fn teacher(&self, id: UserId) -> Result<&TeacherRecord, AppError> {
        self.users
            .get(&id)
            .and_then(User::as_teacher)
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher {} not found", id)))
    }

    pub fn parent(&self, id: UserId) -> Result<&ParentRecord, AppError> {
        self.users
            .get(&id)
            .and_then(User::as_parent)
            .ok_or_else(|| AppError::not_found(anyhow!("Parent {} not found", id)))
    }

    /// Children of a parent that resolve to students, in link order.
    pub fn children_of(&self, parent_id: UserId) -> Result<Vec<&User>, AppError> {
        let parent = self.parent(parent_id)?;
        Ok(parent
            .children
            .iter()
            .filter_map(|id| self.users.get(id))
            .filter(|u| u.role() == Role::Student)
            .collect())
    }

    #[instrument(skip(self))]
    pub fn link_child(&mut self, parent_id: UserId, student_id: UserId) -> Result<bool, AppError> {
        self.student(student_id)?;
        let parent = self
            .users
            .get_mut(&parent_id)
            .and_then(User::as_parent_mut)
            .ok_or_else(|| AppError::not_found(anyhow!("Parent {} not found", parent_id)))?;

        let linked = parent.add_child(student_id);
        if linked {
            info!("Child linked to parent");
        }
        Ok(linked)
    }

    pub fn update_profile(&mut self, id: UserId, update: ProfileUpdate) -> Result<(), AppError> {
        self.user_mut(id)?.profile.apply_update(update)?;
        info!(user_id = %id, "Profile updated");
        Ok(())
    }

    pub fn notify(
        &mut self,
        user_id: UserId,
        message: impl Into<String>,
        priority: Priority,
    ) -> Result<NotificationId, AppError> {
        Ok(self.user_mut(user_id)?.profile.add_notification(message, priority))
    }

    pub fn assignment(&self, id: AssignmentId) -> Result<&Assignment, AppError> {
        self.assignments
            .get(&id)
            .ok_or_else(|| AppError::not_found(anyhow!("Assignment {} not found", id)))
    }

    /// Every assignment in id order.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> + '_ {
        self.assignments.values()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignments_by_teacher(&self, teacher_id: UserId) -> Result<Vec<&Assignment>, AppError> {
        let teacher = self.teacher(teacher_id)?;
        Ok(teacher
            .assignments
            .iter()
            .filter_map(|id| self.assignments.get(id))
            .collect())
    }

    /// Assignments published to `class_id`.
    pub fn assignments_for_class<'a>(&'a self, class_id: &'a str) -> impl Iterator<Item = &'a Assignment> + 'a {
        self.assignments
            .values()
            .filter(move |a| a.class_id == class_id)
    }

    /// Publishes an assignment under a fresh store-wide id.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create_assignment(
        &mut self,
        teacher_id: UserId,
        draft: NewAssignment,
    ) -> Result<AssignmentId, AppError> {
        draft.validate().map_err(|e| AppError::from_validation(&e))?;
        self.teacher(teacher_id)?;

        let id: AssignmentId = self.assignment_ids.next_id();
        let teacher = self
            .users
            .get_mut(&teacher_id)
            .and_then(User::as_teacher_mut)
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher {} not found", teacher_id)))?;
        let assignment = teacher.create_assignment(id, teacher_id, draft)?;

        self.assignments.insert(id, assignment);
        info!(assignment_id = %id, "Assignment created");
        Ok(id)
    }

    /// Hands in `content` for a student at `now`. On any error neither the
    /// assignment nor the student record changes.
    #[instrument(skip(self, content, now))]
    pub fn submit_assignment(
        &mut self,
        student_id: UserId,
        assignment_id: AssignmentId,
        content: &str,
        now: NaiveDateTime,
    ) -> Result<(), AppError> {
        StudentRecord::validate_submission(content)?;
        self.student(student_id)?;

        let assignment = self
            .assignments
            .get_mut(&assignment_id)
            .ok_or_else(|| AppError::not_found(anyhow!("Assignment {} not found", assignment_id)))?;

        if let Err(e) = assignment.add_submission_at(student_id, content, now) {
            warn!(error = %e, "Submission rejected");
            return Err(e);
        }

        let student = self
            .users
            .get_mut(&student_id)
            .and_then(User::as_student_mut)
            .ok_or_else(|| AppError::not_found(anyhow!("Student {} not found", student_id)))?;
        student.submit_assignment(assignment_id, content)?;

        info!("Assignment submitted");
        Ok(())
    }

    /// Grades a student on one of the teacher's assignments, then updates
    /// the grade book, keeps a [`GradeRecord`] and notifies the student and
    /// any parents who opted into grade alerts.
    #[instrument(skip(self, comment))]
    pub fn grade_assignment(
        &mut self,
        teacher_id: UserId,
        assignment_id: AssignmentId,
        student_id: UserId,
        value: i64,
        comment: &str,
    ) -> Result<Score, AppError> {
        self.student(student_id)?;
        let teacher = self
            .users
            .get(&teacher_id)
            .and_then(User::as_teacher)
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher {} not found", teacher_id)))?;
        let assignment = self
            .assignments
            .get_mut(&assignment_id)
            .ok_or_else(|| AppError::not_found(anyhow!("Assignment {} not found", assignment_id)))?;

        if assignment.teacher_id != teacher_id {
            warn!("Grading rejected, assignment belongs to another teacher");
            return Err(AppError::not_found(anyhow!(
                "Assignment {} not found among your assignments",
                assignment_id
            )));
        }

        let previous = assignment.grades.get(&student_id).copied();
        let score = teacher.grade_assignment(assignment, student_id, value)?;
        let subject = assignment.subject.clone();
        let title = assignment.title.clone();

        if let Some(user) = self.users.get_mut(&student_id) {
            if let Some(student) = user.as_student_mut() {
                match previous {
                    Some(old) => student.replace_grade(subject.clone(), old, score),
                    None => student.record_grade(subject.clone(), score),
                }
                student.mark_graded(assignment_id);
            }
            let message = if comment.trim().is_empty() {
                format!("Assignment '{}' graded: {}", title, score)
            } else {
                format!("Assignment '{}' graded: {} ({})", title, score, comment.trim())
            };
            user.profile.add_notification(message, Priority::Normal);
        }

        match self
            .grade_records
            .iter_mut()
            .find(|r| r.student_id == student_id && r.assignment_id == Some(assignment_id))
        {
            Some(record) => {
                record.update_grade(i64::from(score.value()))?;
                record.comment = comment.trim().to_string();
                record.date = Utc::now();
                info!(grade_id = %record.id, "Grade corrected");
            }
            None => {
                let grade_id: GradeId = self.grade_ids.next_id();
                self.grade_records.push(
                    GradeRecord::new(grade_id, student_id, subject.clone(), score, teacher_id, comment.trim())
                        .for_assignment(assignment_id),
                );
            }
        }

        let alerted: Vec<UserId> = self
            .parents
            .iter()
            .filter_map(|id| self.users.get(id))
            .filter(|u| {
                u.as_parent().is_some_and(|p| {
                    p.has_child(student_id) && p.notification_preferences.grade_alerts
                })
            })
            .map(User::id)
            .collect();
        for parent_id in alerted {
            if let Some(parent) = self.users.get_mut(&parent_id) {
                parent.receive_child_notification(
                    student_id,
                    &format!("New grade {} in {}", score, subject),
                );
            }
        }

        info!(%score, "Assignment graded");
        Ok(score)
    }

    pub fn grade_records(&self) -> &[GradeRecord] {
        &self.grade_records
    }

    /// Returns the schedule for `class_id` on `day`, creating it if needed.
    pub fn add_schedule(&mut self, class_id: &str, day: &str) -> ScheduleId {
        if let Some(existing) = self.find_schedule(class_id, day) {
            return existing;
        }

        let (class_id, day) = (class_id.trim(), day.trim());
        let id: ScheduleId = self.schedule_ids.next_id();
        self.schedules.insert(id, Schedule::new(id, class_id, day));
        id
    }

    /// Books a lesson taught by `teacher_id`. An occupied slot is a conflict.
    #[instrument(skip(self))]
    pub fn add_lesson(
        &mut self,
        schedule_id: ScheduleId,
        time: &str,
        subject: &str,
        teacher_id: UserId,
    ) -> Result<(), AppError> {
        self.teacher(teacher_id)?;
        let schedule = self
            .schedules
            .get_mut(&schedule_id)
            .ok_or_else(|| AppError::not_found(anyhow!("Schedule {} not found", schedule_id)))?;

        if !schedule.add_lesson(time, subject, teacher_id) {
            return Err(AppError::conflict(anyhow!(
                "{} {} already has a lesson at {}",
                schedule.class_id,
                schedule.day,
                time.trim()
            )));
        }
        info!("Lesson scheduled");
        Ok(())
    }

    /// Day names match case-insensitively.
    pub fn find_schedule(&self, class_id: &str, day: &str) -> Option<ScheduleId> {
        let (class_id, day) = (class_id.trim(), day.trim());
        self.schedules
            .values()
            .find(|s| s.class_id == class_id && s.day.eq_ignore_ascii_case(day))
            .map(|s| s.id)
    }

    /// Frees a booked slot. An empty slot or unknown schedule is `NotFound`.
    #[instrument(skip(self))]
    pub fn remove_lesson(&mut self, schedule_id: ScheduleId, time: &str) -> Result<(), AppError> {
        let schedule = self
            .schedules
            .get_mut(&schedule_id)
            .ok_or_else(|| AppError::not_found(anyhow!("Schedule {} not found", schedule_id)))?;

        if !schedule.remove_lesson(time) {
            return Err(AppError::not_found(anyhow!(
                "{} {} has no lesson at {}",
                schedule.class_id,
                schedule.day,
                time.trim()
            )));
        }
        info!("Lesson removed");
        Ok(())
    }

    pub fn schedules_for_class(&self, class_id: &str) -> Vec<&Schedule> {
        self.schedules
            .values()
            .filter(|s| s.class_id == class_id)
            .collect()
    }
}
