//! # EduPlatform Core
//!
//! Foundational types shared by every EduPlatform crate:
//!
//! - [`errors`]: Application error type with a coarse [`errors::ErrorKind`]
//! - [`password`]: bcrypt password hashing and verification
//! - [`permissions`]: Capability tags granted to administrators
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_core::errors::AppError;
//! use eduplatform_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use password::{hash_password, hash_password_with_cost, verify_password};
