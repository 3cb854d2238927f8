//! Input DTOs accepted by the store.

use eduplatform_models::Role;
use serde::Deserialize;
use validator::Validate;

/// Role-specific fields supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum NewRoleDetails {
    Student { grade_label: String },
    Teacher {
        subjects: Vec<String>,
        #[serde(default)]
        classes: Vec<String>,
        /// Teaching hours per week.
        #[serde(default)]
        workload: u32,
    },
    Parent,
    Admin,
}

impl NewRoleDetails {
    pub fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Teacher { .. } => Role::Teacher,
            Self::Parent => Role::Parent,
            Self::Admin => Role::Admin,
        }
    }
}

/// DTO for registering a new user of any role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(flatten)]
    pub details: NewRoleDetails,
}

impl NewUser {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        details: NewRoleDetails,
    ) -> Self {
        Self {
            full_name: full_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_trims_identity_fields() {
        let dto = NewUser::new("  Alice Adam ", " alice@edu.com ", "student123", NewRoleDetails::Parent);
        assert_eq!(dto.full_name, "Alice Adam");
        assert_eq!(dto.email, "alice@edu.com");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_empty_fields_fail_validation() {
        let dto = NewUser::new("", "", "", NewRoleDetails::Admin);
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_role_of_details() {
        let details = NewRoleDetails::Teacher {
            subjects: vec!["Physics".to_string()],
            classes: Vec::new(),
            workload: 0,
        };
        assert_eq!(details.role(), Role::Teacher);
    }
}
