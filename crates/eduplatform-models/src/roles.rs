//! The four fixed user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role slugs - use these for parsing and serialisation instead of literals
pub mod slugs {
    pub const STUDENT: &str = "student";
    pub const TEACHER: &str = "teacher";
    pub const PARENT: &str = "parent";
    pub const ADMIN: &str = "admin";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Admin,
}

impl Role {
    /// All roles in registration-menu order.
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Parent, Role::Admin];

    /// Display name, as stored in exports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Teacher => "Teacher",
            Self::Parent => "Parent",
            Self::Admin => "Admin",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Student => slugs::STUDENT,
            Self::Teacher => slugs::TEACHER,
            Self::Parent => slugs::PARENT,
            Self::Admin => slugs::ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            slugs::STUDENT => Ok(Self::Student),
            slugs::TEACHER => Ok(Self::Teacher),
            slugs::PARENT => Ok(Self::Parent),
            slugs::ADMIN => Ok(Self::Admin),
            _ => Err(format!("{:?} is not a valid Role.", s)),
        }
    }
}
