use chrono::{Duration, Local, NaiveDateTime, Timelike};
use eduplatform_core::hash_password_with_cost;
use eduplatform_models::{
    AssignmentId, Difficulty, NewAssignment, ParentRecord, Role, StudentRecord, TeacherRecord,
    User, UserId, UserProfile,
};
use eduplatform_store::DataStore;
use std::sync::atomic::{AtomicUsize, Ordering};

/// bcrypt's minimum cost keeps fixtures fast.
pub const FIXTURE_COST: u32 = 4;

pub const TEST_CLASS: &str = "9-A";

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Inserts a user of `role` with a low-cost password hash.
pub fn create_test_user(store: &mut DataStore, email: &str, password: &str, role: Role) -> TestUser {
    let hashed = hash_password_with_cost(password, FIXTURE_COST).unwrap();
    let id = store.next_id();
    let profile = UserProfile::new(id, "Test User", email, hashed);

    let user = match role {
        Role::Student => User::student(profile, StudentRecord::new(TEST_CLASS)),
        Role::Teacher => {
            let mut record = TeacherRecord::new(vec!["Mathematics".to_string()]);
            record.classes = vec![TEST_CLASS.to_string()];
            User::teacher(profile, record)
        }
        Role::Parent => User::parent(profile, ParentRecord::default()),
        Role::Admin => User::admin(profile),
    };
    store.add_user(user);

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        role,
    }
}

pub fn generate_unique_email() -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("test{}@edu.com", COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Whole-minute deadline `days` from now.
#[allow(dead_code)]
pub fn deadline_in(days: i64) -> NaiveDateTime {
    let deadline = Local::now().naive_local() + Duration::days(days);
    deadline.with_second(0).unwrap().with_nanosecond(0).unwrap()
}

#[allow(dead_code)]
pub fn create_test_assignment(store: &mut DataStore, teacher_id: UserId, title: &str) -> AssignmentId {
    store
        .create_assignment(
            teacher_id,
            NewAssignment {
                title: title.to_string(),
                description: "Test description".to_string(),
                deadline: deadline_in(7),
                subject: "Mathematics".to_string(),
                class_id: TEST_CLASS.to_string(),
                difficulty: Difficulty::Medium,
            },
        )
        .unwrap()
}
