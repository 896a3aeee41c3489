//! Backend API Client
//!
//! The dashboard talks to the backend through four operations. They are
//! expressed as the [`InsightsApi`] trait so the orchestration layer runs
//! unchanged over the native reqwest client, the browser's gloo-net client,
//! or an in-memory double in tests.
//!
//! # Endpoints
//!
//! - `POST /api/auth/login` - exchange credentials for a bearer token
//! - `GET /api/insights?limit=N` - most recent insights (bearer)
//! - `POST /api/insights/generate` - compute insights for a window (bearer)
//! - `POST /api/seed/demo` - populate demonstration data

mod error;
#[cfg(feature = "native")]
mod http;

pub use error::{ClientError, ClientResult, Failure};
#[cfg(feature = "native")]
pub use http::HttpClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::insights::{GenerateWindow, Insight, Session};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const INSIGHTS_PATH: &str = "/api/insights";
pub const GENERATE_PATH: &str = "/api/insights/generate";
pub const SEED_PATH: &str = "/api/seed/demo";

/// Maximum number of insights requested per fetch
pub const DEFAULT_INSIGHT_LIMIT: u32 = 10;

/// Typed access to the backend.
///
/// Every call is a single request: no retries, no timeouts, no caching.
/// Futures are not required to be `Send`, which lets browser clients
/// implement the trait.
#[async_trait(?Send)]
pub trait InsightsApi {
    /// Log in and return the issued bearer token
    async fn login(&self, username: &str, password: &str) -> ClientResult<Session>;

    /// Fetch at most `limit` insights, in server order
    async fn fetch_insights(&self, session: &Session, limit: u32) -> ClientResult<Vec<Insight>>;

    /// Ask the backend to generate insights for `window`; the response body is ignored
    async fn generate_insights(&self, session: &Session, window: &GenerateWindow) -> ClientResult<()>;

    /// Ask the backend to load demonstration data; the response body is ignored
    async fn seed_demo(&self) -> ClientResult<()>;
}

/// Path and query for an insight fetch
pub fn insights_path(limit: u32) -> String {
    format!("{}?limit={}", INSIGHTS_PATH, limit)
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

impl From<TokenResponse> for Session {
    fn from(response: TokenResponse) -> Self {
        Session::new(response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_path() {
        assert_eq!(insights_path(DEFAULT_INSIGHT_LIMIT), "/api/insights?limit=10");
    }

    #[test]
    fn test_token_response_ignores_extra_fields() {
        let response: TokenResponse = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(Session::from(response).token(), "abc");

        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token": "xyz", "token_type": "bearer"}"#).unwrap();
        assert_eq!(Session::from(response).bearer(), "Bearer xyz");
    }
}
