//! Seed data shapes.

use eduplatform_models::{AssignmentId, Role, Score, UserId};

/// Login shown at startup for a seeded demo account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAccount {
    pub role: Role,
    pub full_name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
}

pub const DEMO_ACCOUNTS: [DemoAccount; 4] = [
    DemoAccount {
        role: Role::Admin,
        full_name: "System Admin",
        email: "admin@edu.com",
        password: "admin123",
    },
    DemoAccount {
        role: Role::Teacher,
        full_name: "John Adam",
        email: "john@edu.com",
        password: "teacher123",
    },
    DemoAccount {
        role: Role::Student,
        full_name: "Alice Adam",
        email: "alice@edu.com",
        password: "student123",
    },
    DemoAccount {
        role: Role::Parent,
        full_name: "Bob Adam",
        email: "bob@edu.com",
        password: "parent123",
    },
];

/// Ids of everything the demo seed created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoIds {
    pub admin: UserId,
    pub teacher: UserId,
    pub student: UserId,
    pub parent: UserId,
    pub assignment: AssignmentId,
}

/// A generated student before it receives an id.
#[derive(Debug, Clone)]
pub struct StudentSeed {
    pub full_name: String,
    pub email: String,
    pub grade_label: String,
    pub grades: Vec<(&'static str, Score)>,
}

#[derive(Debug, Clone, Default)]
pub struct SeedSummary {
    pub demo: Option<DemoIds>,
    pub extra_students: Vec<UserId>,
}
