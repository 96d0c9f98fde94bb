//! HTTP client for the generation backend
//!
//! A thin wrapper over the backend's REST API. Every call is a single
//! request/response: no retries, no backoff. Backend error bodies are
//! reduced to their message text before reaching the caller.

pub mod types;

pub use types::{
    ApiResponse, ConnectResponse, ConnectionHealth, DatabaseConnection, DatabaseHealth,
    DatabaseType, HealthState, HealthStatus, MapperOptions, MapperRequest, TableInfo, TypeRequest,
};

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const API_PREFIX: &str = "/api/v1";

/// Client-side API failure conditions
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Setup(reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned {status}: {message}")]
    Backend {
        status: StatusCode,
        message: String,
    },

    #[error("Failed to decode backend response: {0}")]
    Decode(reqwest::Error),
}

/// Thin client for the generation backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Setup)?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { http, base_url })
    }

    /// The backend base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Generate typed-model source for the given request
    pub async fn generate_type(&self, request: &TypeRequest) -> Result<String, ApiError> {
        self.post_text("/type", request).await
    }

    /// Generate persistence-mapper source for the given request
    pub async fn generate_mapper(&self, request: &MapperRequest) -> Result<String, ApiError> {
        self.post_text("/mapper", request).await
    }

    /// List the saved database connections
    pub async fn list_connections(&self) -> Result<Vec<DatabaseConnection>, ApiError> {
        let response: ApiResponse<Vec<DatabaseConnection>> = self.get_json("/connection").await?;
        Ok(response.data)
    }

    /// Fetch one saved connection by id
    pub async fn get_connection(&self, id: i64) -> Result<DatabaseConnection, ApiError> {
        self.get_json(&format!("/connection/{id}")).await
    }

    /// Probe a connection: reachability, ping, table inventory
    pub async fn test_connection(
        &self,
        connection: &DatabaseConnection,
    ) -> Result<ConnectResponse, ApiError> {
        let url = self.url("/connection/test");
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(connection)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Probe backend health
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    async fn post_text<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let response = Self::check_status(response).await?;
        response.text().await.map_err(ApiError::Decode)
    }

    /// Reduce a non-success response to its message text
    ///
    /// Prefers a `message` or `error` field from a JSON body, then the
    /// raw body, then the status line.
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    "An unexpected error occurred".to_string()
                } else {
                    body.trim().to_string()
                }
            });

        Err(ApiError::Backend { status, message })
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for field in ["message", "error"] {
        if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
            return Some(text.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_are_trimmed() {
        let client = ApiClient::new("http://localhost:8080//", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/type"), "http://localhost:8080/api/v1/type");
    }

    #[test]
    fn test_extract_error_message_prefers_message_field() {
        assert_eq!(
            extract_error_message(r#"{"message": "bad connection"}"#).as_deref(),
            Some("bad connection")
        );
        assert_eq!(
            extract_error_message(r#"{"error": "timeout"}"#).as_deref(),
            Some("timeout")
        );
        assert_eq!(extract_error_message("plain text"), None);
        assert_eq!(extract_error_message(r#"{"code": 500}"#), None);
    }
}
