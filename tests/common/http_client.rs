//! HTTP client helpers for tests.

use std::time::Duration;

use textscore::gateway::{RewriteResponse, ScoreResponse, TextBlock};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    pub fn raw(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn health(&self) -> Result<serde_json::Value, TestClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Self::decode(resp).await
    }

    pub async fn score(&self, blocks: Vec<TextBlock>) -> Result<ScoreResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/score"))
            .json(&serde_json::json!({ "blocks": blocks }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub async fn rewrite(&self, text: &str) -> Result<RewriteResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/rewrite"))
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, TestClientError> {
        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }
}

pub fn block(id: &str, text: &str) -> TextBlock {
    TextBlock {
        id: id.to_string(),
        text: text.to_string(),
    }
}
