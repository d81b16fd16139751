//! Catalog error types

use thiserror::Error;

use crate::source::SourceError;

/// Errors surfaced by catalog queries
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("Invalid argument: {0}")]
    Validation(String),
}

impl CatalogError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        CatalogError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Endpoint;

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::not_found("Prompt", 999999);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Prompt not found: 999999");
    }

    #[test]
    fn test_source_error_is_transparent() {
        let err: CatalogError = SourceError::Status {
            endpoint: Endpoint::Prompts,
            status: 502,
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 502 fetching prompts");
        assert!(!err.is_validation());
    }
}
