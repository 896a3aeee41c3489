//! HTTP API Client
//!
//! gloo-net implementation of the backend API.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use signal_noise::client::{
    insights_path, ClientError, ClientResult, Failure, InsightsApi, LoginRequest, TokenResponse,
    GENERATE_PATH, LOGIN_PATH, SEED_PATH,
};
use signal_noise::insights::{GenerateWindow, Insight, Session};

/// Local storage key holding an alternative backend origin
pub const API_BASE_KEY: &str = "signal_api_base";

/// Backend base URL: same origin unless overridden in local storage
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_default();
    normalize_base(&url)
}

/// Remove trailing slashes so paths can be appended directly
fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Backend client over the browser's fetch API
#[derive(Debug, Clone)]
pub struct GlooClient {
    base: String,
}

impl GlooClient {
    pub fn new(base: impl AsRef<str>) -> Self {
        Self {
            base: normalize_base(base.as_ref()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait(?Send)]
impl InsightsApi for GlooClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        let response = Request::post(&self.url(LOGIN_PATH))
            .json(&LoginRequest { username, password })
            .map_err(|e| ClientError::Auth(invalid_body(e)))?
            .send()
            .await
            .map_err(|e| ClientError::Auth(Failure::Network(e.to_string())))?;

        let token: TokenResponse = read_json(response).await.map_err(ClientError::Auth)?;
        Ok(token.into())
    }

    async fn fetch_insights(&self, session: &Session, limit: u32) -> ClientResult<Vec<Insight>> {
        let response = Request::get(&self.url(&insights_path(limit)))
            .header("Authorization", &session.bearer())
            .send()
            .await
            .map_err(|e| ClientError::Fetch(Failure::Network(e.to_string())))?;

        read_json(response).await.map_err(ClientError::Fetch)
    }

    async fn generate_insights(&self, session: &Session, window: &GenerateWindow) -> ClientResult<()> {
        let response = Request::post(&self.url(GENERATE_PATH))
            .header("Authorization", &session.bearer())
            .json(window)
            .map_err(|e| ClientError::Generate(invalid_body(e)))?
            .send()
            .await
            .map_err(|e| ClientError::Generate(Failure::Network(e.to_string())))?;

        ensure_ok(&response).await.map_err(ClientError::Generate)
    }

    async fn seed_demo(&self) -> ClientResult<()> {
        let response = Request::post(&self.url(SEED_PATH))
            .send()
            .await
            .map_err(|e| ClientError::Seed(Failure::Network(e.to_string())))?;

        ensure_ok(&response).await.map_err(ClientError::Seed)
    }
}

/// Body serialization failed before anything was sent
fn invalid_body(e: gloo_net::Error) -> Failure {
    Failure::Request(e.to_string())
}

async fn ensure_ok(response: &Response) -> Result<(), Failure> {
    if response.ok() {
        return Ok(());
    }

    Err(Failure::Status {
        status: response.status(),
        body: response.text().await.unwrap_or_default(),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Failure> {
    ensure_ok(&response).await?;

    response
        .json()
        .await
        .map_err(|e| Failure::Decode(e.to_string()))
}
