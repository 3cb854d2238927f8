use std::fmt;

use anyhow::{Error, anyhow};
use validator::ValidationErrors;

/// Coarse classification of an [`AppError`], used by the console to pick a
/// message and by callers to branch on failure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation error",
            Self::NotFound => "not found",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Internal => "internal error",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unauthorized, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Forbidden, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    /// Flattens `validator` field errors into one message.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        Self::validation(anyhow!(format_validation_errors(errors)))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Hands the wrapped error to `anyhow` call sites. The kind is dropped.
    pub fn into_inner(self) -> anyhow::Error {
        self.error
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    // field_errors() is backed by a HashMap
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(length(max = 3))]
        code: String,
    }

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(AppError::not_found(anyhow!("x")).kind, ErrorKind::NotFound);
        assert_eq!(AppError::validation(anyhow!("x")).kind, ErrorKind::Validation);
        assert_eq!(
            AppError::unauthorized(anyhow!("x")).kind,
            ErrorKind::Unauthorized
        );
        assert_eq!(AppError::forbidden(anyhow!("x")).kind, ErrorKind::Forbidden);
        assert_eq!(AppError::conflict(anyhow!("x")).kind, ErrorKind::Conflict);
        assert_eq!(AppError::internal(anyhow!("x")).kind, ErrorKind::Internal);
    }

    #[test]
    fn test_from_io_error_is_internal() {
        let io = std::io::Error::other("disk full");
        let err: AppError = io.into();
        assert!(err.is(ErrorKind::Internal));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_from_validation_flattens_messages() {
        let sample = Sample {
            name: String::new(),
            code: "toolong".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let err = AppError::from_validation(&errors);

        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.to_string(), "code is invalid, name is required");
    }
}
