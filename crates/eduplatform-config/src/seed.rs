//! Startup seeding configuration.
//!
//! # Environment Variables
//!
//! - `EDU_SEED_DEMO`: Create the four demo accounts (default: `true`)
//! - `EDU_EXTRA_STUDENTS`: Number of generated students (default: `0`)

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedConfig {
    pub demo_accounts: bool,
    pub extra_students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo_accounts: true,
            extra_students: 0,
        }
    }
}

impl SeedConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            demo_accounts: lookup("EDU_SEED_DEMO")
                .map(|v| crate::parse_flag(&v))
                .unwrap_or(true),
            extra_students: lookup("EDU_EXTRA_STUDENTS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}
