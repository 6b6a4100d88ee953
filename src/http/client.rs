use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP client for endpoints that always answer with a JSON envelope
pub struct JsonClient {
    client: Client,
}

impl JsonClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        Ok(Self { client })
    }

    /// GET with query parameters. Non-2xx responses are still decoded,
    /// since the envelope carries the error.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {url}"))?;
        Self::decode(response).await
    }

    /// POST the body as JSON text without a JSON content type, which keeps
    /// browser-oriented backends from requiring a preflight.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).context("Failed to serialize request body")?;
        let response = self
            .client
            .post(url)
            .query(query)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(payload)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {url}"))?;
        Self::decode(response).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;
        serde_json::from_str(&text).with_context(|| {
            format!(
                "Failed to parse response ({}). First 200 chars: {}",
                status,
                text.chars().take(200).collect::<String>()
            )
        })
    }
}
