use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input rejected before it reaches a slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is blank after trimming.
    EmptyField(&'static str),
    /// A score field contains no digits after filtering.
    InvalidScore(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::InvalidScore(field) => write!(f, "{field} must contain 1-2 digits"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank text for a required field.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
