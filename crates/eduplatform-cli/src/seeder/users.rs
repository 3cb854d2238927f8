//! Fake student generation.

use eduplatform_models::{Score, StudentRecord, User, UserId, UserProfile};
use eduplatform_store::DataStore;
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use std::time::Instant;

use super::models::StudentSeed;

pub const SUBJECTS: [&str; 4] = ["Mathematics", "Physics", "Literature", "CS"];
pub const CLASSES: [&str; 4] = ["9-A", "9-B", "10-A", "10-B"];

/// Generates `count` students in parallel, spread round-robin over
/// [`CLASSES`], each with up to three random grades per subject.
pub fn generate_students(count: usize) -> Vec<StudentSeed> {
    (0..count).into_par_iter().map(generate_student).collect()
}

fn generate_student(idx: usize) -> StudentSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email = format!(
        "{}.{}+student{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        idx
    );

    let grades = SUBJECTS
        .iter()
        .flat_map(|subject| {
            let count: usize = (0..4).fake();
            (0..count)
                .filter_map(|_| Score::new((1..6).fake::<i64>()).ok())
                .map(move |score| (*subject, score))
                .collect::<Vec<_>>()
        })
        .collect();

    StudentSeed {
        full_name: format!("{} {}", first_name, last_name),
        email,
        grade_label: CLASSES[idx % CLASSES.len()].to_string(),
        grades,
    }
}

/// Inserts generated students. Every seed shares `password_hash` and, when
/// given, is enrolled in all [`SUBJECTS`] with `teacher`.
pub fn insert_students(
    store: &mut DataStore,
    seeds: Vec<StudentSeed>,
    password_hash: &str,
    teacher: Option<UserId>,
) -> Vec<UserId> {
    seeds
        .into_iter()
        .map(|seed| {
            let mut record = StudentRecord::new(seed.grade_label);
            if let Some(teacher_id) = teacher {
                for subject in SUBJECTS {
                    record.subjects.insert(subject.to_string(), teacher_id);
                }
            }
            for (subject, score) in seed.grades {
                record.record_grade(subject, score);
            }

            let id = store.next_id();
            let profile = UserProfile::new(id, seed.full_name, seed.email, password_hash);
            store.add_user(User::student(profile, record))
        })
        .collect()
}

/// Generates and inserts `count` fake students.
pub fn seed_students(
    store: &mut DataStore,
    count: usize,
    password_hash: &str,
    teacher: Option<UserId>,
) -> Vec<UserId> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let seeds = generate_students(count);
    let ids = insert_students(store, seeds, password_hash, teacher);

    println!("   ✓ Inserted {} students in {:?}", ids.len(), start_time.elapsed());
    ids
}
