//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error, carrying the upstream message verbatim
    #[error("{0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::InvalidCoordinates;

    #[test]
    fn external_service_message_is_verbatim() {
        let err = ApplicationError::ExternalService("Failed to fetch weather data".into());
        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::from(InvalidCoordinates));
        assert!(err.to_string().starts_with("Invalid coordinates"));
    }

    #[test]
    fn configuration_and_internal_are_prefixed() {
        assert_eq!(
            ApplicationError::Configuration("timeout_secs must be greater than 0".into())
                .to_string(),
            "Configuration error: timeout_secs must be greater than 0"
        );
        assert_eq!(
            ApplicationError::Internal("boom".into()).to_string(),
            "Internal error: boom"
        );
    }
}
