//! HTTP client for the backend REST API (reqwest)

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::de::DeserializeOwned;

use super::{
    insights_path, ClientError, ClientResult, Failure, InsightsApi, LoginRequest, TokenResponse,
    GENERATE_PATH, LOGIN_PATH, SEED_PATH,
};
use crate::insights::{GenerateWindow, Insight, Session};

/// Backend client over reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for the backend at `base_url` (e.g. "http://localhost:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait(?Send)]
impl InsightsApi for HttpClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        tracing::debug!(username, "Logging in");

        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| ClientError::Auth(transport(e)))?;

        let token: TokenResponse = read_json(response).await.map_err(ClientError::Auth)?;
        Ok(token.into())
    }

    async fn fetch_insights(&self, session: &Session, limit: u32) -> ClientResult<Vec<Insight>> {
        let response = self
            .client
            .get(self.url(&insights_path(limit)))
            .header(AUTHORIZATION, session.bearer())
            .send()
            .await
            .map_err(|e| ClientError::Fetch(transport(e)))?;

        let insights: Vec<Insight> = read_json(response).await.map_err(ClientError::Fetch)?;
        tracing::debug!(count = insights.len(), "Fetched insights");
        Ok(insights)
    }

    async fn generate_insights(&self, session: &Session, window: &GenerateWindow) -> ClientResult<()> {
        tracing::debug!(
            start = %window.start_time,
            end = %window.end_time,
            "Requesting insight generation"
        );

        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .header(AUTHORIZATION, session.bearer())
            .json(window)
            .send()
            .await
            .map_err(|e| ClientError::Generate(transport(e)))?;

        ensure_success(response).await.map_err(ClientError::Generate)
    }

    async fn seed_demo(&self) -> ClientResult<()> {
        let response = self
            .client
            .post(self.url(SEED_PATH))
            .send()
            .await
            .map_err(|e| ClientError::Seed(transport(e)))?;

        ensure_success(response).await.map_err(ClientError::Seed)
    }
}

fn transport(e: reqwest::Error) -> Failure {
    if e.is_connect() {
        Failure::Network(format!("cannot connect: {}", e))
    } else {
        Failure::Network(e.to_string())
    }
}

/// Non-2xx responses become `Failure::Status` carrying the body text
async fn ensure_success(response: Response) -> Result<(), Failure> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Failure::Status {
        status: status.as_u16(),
        body,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, Failure> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Failure::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| Failure::Decode(e.to_string()))
}
