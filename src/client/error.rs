//! Client error types
//!
//! One variant per API operation, so callers can tell which step of a
//! sequence failed without inspecting status codes.

use thiserror::Error;

/// Errors returned by [`InsightsApi`](super::InsightsApi) implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// `POST /api/auth/login` failed
    #[error("Login failed: {0}")]
    Auth(#[source] Failure),

    /// `GET /api/insights` failed
    #[error("Failed to load insights: {0}")]
    Fetch(#[source] Failure),

    /// `POST /api/insights/generate` failed
    #[error("Failed to generate insights: {0}")]
    Generate(#[source] Failure),

    /// `POST /api/seed/demo` failed
    #[error("Seed failed: {0}")]
    Seed(#[source] Failure),
}

impl ClientError {
    pub fn failure(&self) -> &Failure {
        match self {
            ClientError::Auth(f)
            | ClientError::Fetch(f)
            | ClientError::Generate(f)
            | ClientError::Seed(f) => f,
        }
    }
}

/// What went wrong with a single request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    /// Server answered with a non-2xx status
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    /// Request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Request could not be built, so nothing was sent
    #[error("Invalid request: {0}")]
    Request(String),
}

impl Failure {
    pub fn status(&self) -> Option<u16> {
        match self {
            Failure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_operation() {
        let err = ClientError::Auth(Failure::Status {
            status: 401,
            body: "Invalid credentials".to_string(),
        });
        assert_eq!(err.to_string(), "Login failed: API error 401: Invalid credentials");
        assert_eq!(err.failure().status(), Some(401));

        let err = ClientError::Seed(Failure::Network("connection refused".to_string()));
        assert_eq!(err.to_string(), "Seed failed: Network error: connection refused");
        assert_eq!(err.failure().status(), None);

        let err = ClientError::Generate(Failure::Request("window out of range".to_string()));
        assert_eq!(err.to_string(), "Failed to generate insights: Invalid request: window out of range");
    }
}
