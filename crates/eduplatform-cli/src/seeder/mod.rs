//! Session seeding.
//!
//! The demo seed recreates four accounts (one per role) and one assignment
//! due in a week. Extra fake students can be generated on top.

pub mod models;
pub mod users;

use anyhow::anyhow;
use chrono::{Duration, Local, Timelike};
use eduplatform_config::SeedConfig;
use eduplatform_core::{AppError, hash_password};
use eduplatform_models::{Difficulty, NewAssignment, Role, Score, UserId};
use eduplatform_store::{DataStore, NewRoleDetails, NewUser};
use tracing::info;

pub use models::{DEMO_ACCOUNTS, DemoAccount, DemoIds, SeedSummary, StudentSeed};

/// Password shared by every generated student.
pub const FAKE_STUDENT_PASSWORD: &str = "student123";

/// Runs the seeds enabled in `config`.
pub fn seed(store: &mut DataStore, config: &SeedConfig) -> Result<SeedSummary, AppError> {
    let demo = if config.demo_accounts {
        Some(seed_demo_accounts(store)?)
    } else {
        None
    };

    let extra_students = if config.extra_students > 0 {
        // One hash for the whole batch
        let password_hash = hash_password(FAKE_STUDENT_PASSWORD)?;
        users::seed_students(
            store,
            config.extra_students,
            &password_hash,
            demo.map(|d| d.teacher),
        )
    } else {
        Vec::new()
    };

    info!(
        demo = demo.is_some(),
        extra_students = extra_students.len(),
        "Store seeded"
    );
    Ok(SeedSummary {
        demo,
        extra_students,
    })
}

fn demo_account(role: Role) -> Result<&'static DemoAccount, AppError> {
    DEMO_ACCOUNTS
        .iter()
        .find(|a| a.role == role)
        .ok_or_else(|| AppError::internal(anyhow!("No demo account for role {}", role)))
}

fn register_demo(store: &mut DataStore, role: Role, details: NewRoleDetails) -> Result<UserId, AppError> {
    let account = demo_account(role)?;
    store.register_user(NewUser::new(
        account.full_name,
        account.email,
        account.password,
        details,
    ))
}

pub fn seed_demo_accounts(store: &mut DataStore) -> Result<DemoIds, AppError> {
    let admin = register_demo(store, Role::Admin, NewRoleDetails::Admin)?;

    let teacher = register_demo(
        store,
        Role::Teacher,
        NewRoleDetails::Teacher {
            subjects: vec!["Mathematics".to_string(), "Physics".to_string()],
            classes: vec!["9-A".to_string(), "10-B".to_string()],
            workload: 20,
        },
    )?;

    let student = register_demo(
        store,
        Role::Student,
        NewRoleDetails::Student {
            grade_label: "9-A".to_string(),
        },
    )?;
    if let Some(record) = store.user_mut(student)?.as_student_mut() {
        for subject in ["Mathematics", "Physics"] {
            record.subjects.insert(subject.to_string(), teacher);
        }
        for (subject, values) in [("Mathematics", [4, 5, 4]), ("Physics", [5, 4, 5])] {
            for value in values {
                record.record_grade(subject, Score::new(value)?);
            }
        }
    }

    let parent = register_demo(store, Role::Parent, NewRoleDetails::Parent)?;
    store.link_child(parent, student)?;

    let deadline = (Local::now().naive_local() + Duration::days(7))
        .with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .ok_or_else(|| AppError::internal(anyhow!("Failed to compute demo deadline")))?;
    let assignment = store.create_assignment(
        teacher,
        NewAssignment {
            title: "Python task".to_string(),
            description: "Solve the given task".to_string(),
            deadline,
            subject: "CS".to_string(),
            class_id: "9-A".to_string(),
            difficulty: Difficulty::Medium,
        },
    )?;

    Ok(DemoIds {
        admin,
        teacher,
        student,
        parent,
        assignment,
    })
}
