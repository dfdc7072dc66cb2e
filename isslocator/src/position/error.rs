//! Error types for position fetches.

use thiserror::Error;

/// Errors that can occur when fetching the current position.
///
/// Both variants are absorbed by the tracker's backlog accounting; neither is
/// surfaced to the user on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, timeout), non-success status, or a
    /// failure that escaped the client and was normalised at the boundary.
    #[error("Network error: {0}")]
    Network(String),

    /// Successful status but the body lacked usable `latitude`/`longitude`.
    #[error("Malformed position response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Returns true for transport-level failures.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }

    /// Returns true when the server answered with an unusable body.
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::MalformedResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = FetchError::Network("HTTP 503 from http://x".to_string());
        assert_eq!(err.to_string(), "Network error: HTTP 503 from http://x");

        let err = FetchError::MalformedResponse("missing field `latitude`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_classification() {
        assert!(FetchError::Network(String::new()).is_network());
        assert!(!FetchError::Network(String::new()).is_malformed());
        assert!(FetchError::MalformedResponse(String::new()).is_malformed());
    }
}
