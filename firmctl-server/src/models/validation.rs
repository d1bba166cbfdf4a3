//! Validation error types

use std::fmt;

/// Validation error for request payloads and path parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty (or only whitespace) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't parse into the expected shape (e.g., integer id)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    Body { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::Body { message } => write!(f, "invalid request body: {}", message),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 255 characters"
        );
    }

    #[test]
    fn invalid_format_display() {
        let err = ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a 32-bit integer",
        };
        assert_eq!(err.to_string(), "id: must be a 32-bit integer");
    }
}
