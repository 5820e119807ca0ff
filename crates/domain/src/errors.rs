//! Domain-level errors

use thiserror::Error;

use crate::value_objects::InvalidCoordinates;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Coordinates outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_creates_correct_error() {
        let err = DomainError::not_found("Location", "Atlantis");
        match err {
            DomainError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "Location");
                assert_eq!(id, "Atlantis");
            },
            DomainError::InvalidCoordinates(_) => unreachable!("Expected NotFound error"),
        }
    }

    #[test]
    fn not_found_display() {
        let err = DomainError::not_found("Location", "42");
        assert_eq!(err.to_string(), "Location not found: 42");
    }

    #[test]
    fn invalid_coordinates_keeps_message() {
        let err = DomainError::from(InvalidCoordinates);
        assert!(err.to_string().starts_with("Invalid coordinates"));
    }
}
