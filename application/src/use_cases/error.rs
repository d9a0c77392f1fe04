//! Errors shared by the discussion, motion and membership services.

use crate::ports::persistence::RepositoryError;
use crate::ports::version_log::VersionLogError;
use agora_domain::{DomainError, ValidationErrors};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Version log error: {0}")]
    VersionLog(#[from] VersionLogError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// Validation errors, when the operation was rejected by validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Domain(e) => e.validation_errors(),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Domain(DomainError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = ServiceError::not_found("Discussion", 12);
        assert_eq!(error.to_string(), "Discussion 12 not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_validation_errors_pass_through() {
        let mut errors = ValidationErrors::new();
        errors.add("private", "must be private in this group");
        let error = ServiceError::from(errors);
        assert_eq!(error.validation_errors().unwrap().on("private").count(), 1);
        assert!(!error.is_not_found());
    }
}
