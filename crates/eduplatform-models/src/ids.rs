//! Strongly-typed ID newtypes for domain entities.
//!
//! Every entity is keyed by a sequential `u64`. The newtypes keep a
//! `UserId` from being passed where an `AssignmentId` is expected, even
//! though both wrap the same integer type.
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_models::ids::{UserId, AssignmentId};
//!
//! fn get_user(id: UserId) { /* ... */ }
//!
//! get_user(UserId::new(3));           // OK
//! // get_user(AssignmentId::new(3));  // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed ID newtype over `u64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an ID from a raw value.
            #[inline]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Get the inner value.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            #[inline]
            fn from(id: $name) -> u64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for User entities of every role.
    UserId
);

define_id!(
    /// Strongly-typed ID for Assignment entities. Unique across teachers.
    AssignmentId
);

define_id!(
    /// Strongly-typed ID for a notification within one user's inbox.
    NotificationId
);

define_id!(
    /// Strongly-typed ID for Grade records.
    GradeId
);

define_id!(
    /// Strongly-typed ID for Schedule entities.
    ScheduleId
);

/// Monotonic id generator starting at 1. Retired ids are never reissued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value and advances the sequence.
    pub fn next_value(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// Typed variant of [`IdSequence::next_value`].
    pub fn next_id<T: From<u64>>(&mut self) -> T {
        T::from(self.next_value())
    }

    /// The value the next call will return, without advancing.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
