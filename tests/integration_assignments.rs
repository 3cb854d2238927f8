mod common;

use chrono::Duration;
use common::{create_test_assignment, create_test_user, generate_unique_email};
use eduplatform_core::ErrorKind;
use eduplatform_models::{Priority, Role, Score, SubmissionState};
use eduplatform_store::DataStore;

struct Classroom {
    store: DataStore,
    teacher: common::TestUser,
    other_teacher: common::TestUser,
    student: common::TestUser,
    parent: common::TestUser,
}

fn classroom() -> Classroom {
    let mut store = DataStore::new();
    let teacher = create_test_user(&mut store, &generate_unique_email(), "pw", Role::Teacher);
    let other_teacher = create_test_user(&mut store, &generate_unique_email(), "pw", Role::Teacher);
    let student = create_test_user(&mut store, &generate_unique_email(), "pw", Role::Student);
    let parent = create_test_user(&mut store, &generate_unique_email(), "pw", Role::Parent);
    store.link_child(parent.id, student.id).unwrap();
    Classroom {
        store,
        teacher,
        other_teacher,
        student,
        parent,
    }
}

#[test]
fn test_assignment_ids_are_unique_across_teachers() {
    let mut c = classroom();
    let first = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");
    let second = create_test_assignment(&mut c.store, c.other_teacher.id, "Vectors");
    let third = create_test_assignment(&mut c.store, c.teacher.id, "Decimals");

    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_eq!(c.store.assignments_by_teacher(c.teacher.id).unwrap().len(), 2);
    assert_eq!(c.store.assignments_by_teacher(c.other_teacher.id).unwrap().len(), 1);
}

#[test]
fn test_only_teachers_create_assignments() {
    let mut c = classroom();
    let result = c.store.create_assignment(
        c.student.id,
        eduplatform_models::NewAssignment {
            title: "Sneaky".to_string(),
            description: String::new(),
            deadline: common::deadline_in(1),
            subject: "Mathematics".to_string(),
            class_id: common::TEST_CLASS.to_string(),
            difficulty: Default::default(),
        },
    );
    assert!(result.unwrap_err().is(ErrorKind::NotFound));
    assert_eq!(c.store.assignment_count(), 0);
}

#[test]
fn test_submission_at_deadline_is_accepted() {
    let mut c = classroom();
    let id = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");
    let deadline = c.store.assignment(id).unwrap().deadline;

    c.store
        .submit_assignment(c.student.id, id, "1/2 + 1/4 = 3/4", deadline)
        .unwrap();

    assert!(c.store.assignment(id).unwrap().has_submission_from(c.student.id));
    let record = c.store.student(c.student.id).unwrap();
    assert_eq!(record.status_of(id), Some(SubmissionState::Submitted));
}

#[test]
fn test_submission_after_deadline_changes_nothing() {
    let mut c = classroom();
    let id = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");
    let late = c.store.assignment(id).unwrap().deadline + Duration::minutes(1);

    let err = c
        .store
        .submit_assignment(c.student.id, id, "late work", late)
        .unwrap_err();

    assert!(err.is(ErrorKind::Validation));
    assert!(c.store.assignment(id).unwrap().submissions.is_empty());
    assert_eq!(c.store.student(c.student.id).unwrap().status_of(id), None);
}

#[test]
fn test_grading_updates_student_records_and_alerts_parent() {
    let mut c = classroom();
    let id = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");

    let score = c
        .store
        .grade_assignment(c.teacher.id, id, c.student.id, 4, "Good")
        .unwrap();

    assert_eq!(score, Score::new(4).unwrap());
    let record = c.store.student(c.student.id).unwrap();
    assert_eq!(record.view_grades(Some("Mathematics"))["Mathematics"], vec![score]);
    assert_eq!(record.status_of(id), Some(SubmissionState::Graded));
    assert_eq!(c.store.grade_records().len(), 1);

    let parent = c.store.user(c.parent.id).unwrap();
    let alerts = parent.profile.view_notifications();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].priority, Priority::High);
    assert_eq!(
        alerts[0].message,
        format!("Child {}: New grade 4 in Mathematics", c.student.id)
    );
}

#[test]
fn test_teacher_cannot_grade_another_teachers_assignment() {
    let mut c = classroom();
    let id = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");

    let err = c
        .store
        .grade_assignment(c.other_teacher.id, id, c.student.id, 5, "")
        .unwrap_err();

    assert!(err.is(ErrorKind::NotFound));
    assert!(c.store.assignment(id).unwrap().grades.is_empty());
    assert!(c.store.student(c.student.id).unwrap().grades.is_empty());
}

#[test]
fn test_out_of_range_grade_changes_nothing() {
    let mut c = classroom();
    let id = create_test_assignment(&mut c.store, c.teacher.id, "Fractions");

    for value in [0, 6, -1] {
        let err = c
            .store
            .grade_assignment(c.teacher.id, id, c.student.id, value, "")
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    assert!(c.store.assignment(id).unwrap().grades.is_empty());
    assert!(c.store.grade_records().is_empty());
    let parent = c.store.user(c.parent.id).unwrap();
    assert!(parent.profile.notifications().is_empty());
}

#[test]
fn test_average_grade_across_subjects() {
    let mut c = classroom();
    let record = c
        .store
        .user_mut(c.student.id)
        .unwrap()
        .as_student_mut()
        .unwrap();
    for (subject, values) in [("Math", [4, 5, 4]), ("Physics", [5, 4, 5])] {
        for value in values {
            record.record_grade(subject, Score::new(value).unwrap());
        }
    }

    let record = c.store.student(c.student.id).unwrap();
    assert_eq!(record.calculate_average_grade(None), 4.5);
    assert!((record.calculate_average_grade(Some("Math")) - 13.0 / 3.0).abs() < 1e-9);
    assert_eq!(record.calculate_average_grade(Some("History")), 0.0);
}
