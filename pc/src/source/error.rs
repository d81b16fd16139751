//! Data source error types

use thiserror::Error;

use super::Endpoint;

/// Errors that can occur while fetching a catalog document
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error fetching {endpoint}: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} fetching {endpoint}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Malformed {endpoint} document: {source}")]
    Parse {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected {expected} document, got {actual}")]
    WrongDocument { expected: Endpoint, actual: Endpoint },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl SourceError {
    /// Connection, timeout or non-success status
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Network { .. } | SourceError::Status { .. })
    }

    /// The provider answered but the payload could not be used
    pub fn is_parse(&self) -> bool {
        matches!(self, SourceError::Parse { .. } | SourceError::WrongDocument { .. })
    }

    /// Endpoint the failure relates to, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            SourceError::Network { endpoint, .. } => Some(*endpoint),
            SourceError::Status { endpoint, .. } => Some(*endpoint),
            SourceError::Parse { endpoint, .. } => Some(*endpoint),
            SourceError::WrongDocument { actual, .. } => Some(*actual),
            SourceError::ClientBuild(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transport() {
        let err = SourceError::Status {
            endpoint: Endpoint::Packs,
            status: 503,
        };
        assert!(err.is_transport());
        assert!(!err.is_parse());
        assert_eq!(err.to_string(), "HTTP 503 fetching packs");
    }

    #[test]
    fn test_parse_classification() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SourceError::Parse {
            endpoint: Endpoint::Prompts,
            source: json_err,
        };
        assert!(err.is_parse());
        assert!(!err.is_transport());
        assert_eq!(err.endpoint(), Some(Endpoint::Prompts));
    }
}
