use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;

mod admin;
mod attendance;
mod challenges;
mod contact;
mod error;
mod members;
mod programs;
mod retry;
mod trainers;

pub use error::{ApiError, ApiResult, OrEmpty, NETWORK_MESSAGE};
pub use members::PhotoFile;
pub use retry::RetryConfig;

/// API client for the Revive Fitness backend.
///
/// Entity-specific calls live in one file per entity (`members.rs`, `programs.rs`, ...),
/// so every endpoint is decoded in exactly one place.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    retry_config: RetryConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_retry_config(config, RetryConfig::with_max_retries(config.api.max_retries))
    }

    /// Create a new API client with custom retry configuration
    pub fn with_retry_config(config: &Config, retry_config: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: None,
            retry_config,
        })
    }

    /// Attach the bearer token of the signed-in identity, if it has one
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET and decode JSON, retrying transport and server failures
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let this = self;
        self.retry_config
            .execute(move || async move {
                let response = this.request(Method::GET, path).send().await?;
                read_json(response).await
            })
            .await
    }

    /// Send a JSON body and decode the JSON answer
    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        read_json(response).await
    }

    /// Send a request whose answer carries no payload we care about
    async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Request failed with {}: {}", status, body);
        Err(ApiError::from_status(status, &body))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = ensure_success(response).await?;
    let url = response.url().to_string();
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        tracing::warn!("Invalid JSON from {}: {}", url, e);
        ApiError::MalformedResponse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let config = Config::default();
        let client = ApiClient::new(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let mut config = Config::default();
        config.api.base_url = "http://gym.local:8080/".to_string();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://gym.local:8080");
    }
}
