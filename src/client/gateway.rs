//! Verb-based HTTP gateway for the board API
//!
//! Thin wrapper over reqwest exposing one call per HTTP verb against a
//! configured base address. Non-2xx responses become a uniform
//! [`ApiError::Transport`] carrying the status line and raw body; there is
//! no retry and no timeout override beyond the client default.

use std::time::Duration;

use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal HTTP client wrapper for the board API
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: HttpClient,
    base_url: String,
}

impl ApiGateway {
    /// Create a gateway against the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Empty-body PUT; the historization endpoint takes no payload
    pub async fn put<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::PUT, path, None).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None).await
    }

    /// One network round trip; failures propagate immediately to the caller
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(ref body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string();
            let body = response.text().await.unwrap_or_default();
            log::error!("{} {} failed: HTTP {} - {}", method, path, status.as_u16(), status_text);
            return Err(ApiError::Transport {
                status: status.as_u16(),
                status_text,
                body,
            }
            .into());
        }

        response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("failed to decode {} {} response: {}", method, path, e))
                .into()
        })
    }
}
