//! HTTP client for the counter API, used by the terminal UI.

mod error;

use std::time::Duration;

use reqwest::Method;

use crate::api::types::{CounterResponse, ErrorBody, HealthStatus};
use crate::config::Config;
use crate::store::Delta;

pub use error::ClientError;

#[derive(Clone)]
pub struct CounterClient {
    http: reqwest::Client,
    base_url: String,
}

impl CounterClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(&config.client.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/counter`
    pub async fn fetch(&self) -> Result<i64, ClientError> {
        self.counter_request(Method::GET, "/api/counter").await
    }

    /// `POST /api/counter/increment`
    pub async fn increment(&self) -> Result<i64, ClientError> {
        self.counter_request(Method::POST, "/api/counter/increment")
            .await
    }

    /// `POST /api/counter/decrement`
    pub async fn decrement(&self) -> Result<i64, ClientError> {
        self.counter_request(Method::POST, "/api/counter/decrement")
            .await
    }

    pub async fn apply(&self, delta: Delta) -> Result<i64, ClientError> {
        match delta {
            Delta::Increment => self.increment().await,
            Delta::Decrement => self.decrement().await,
        }
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(ClientError::Network)?;
        let response = ensure_success(response).await?;
        response.json().await.map_err(ClientError::Decode)
    }

    async fn counter_request(&self, method: Method, path: &str) -> Result<i64, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .request(method, &url)
            .send()
            .await
            .map_err(ClientError::Network)?;
        let response = ensure_success(response).await?;
        let body: CounterResponse = response.json().await.map_err(ClientError::Decode)?;
        Ok(body.value)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
