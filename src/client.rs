//! HTTP gateway to the Sheetlink spreadsheet API.
//!
//! One tool invocation maps to one [`ApiRequest`] and one HTTP exchange.
//! Every request carries the bearer credential and a JSON content type; the
//! response body is returned as parsed JSON with no schema enforcement.
//! There is no retry and no locally imposed timeout: a hung remote call is
//! bounded only by whatever the transport itself does.

use crate::config::ServerConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// One outbound exchange: relative path plus method/query/body overrides.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Seam between dispatch and the network, so tests can script responses.
#[async_trait]
pub trait SheetsGateway: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl SheetsGateway for ApiClient {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let ApiRequest {
            method,
            path,
            query,
            body,
        } = request;

        let url = self.url_for(&path);
        tracing::debug!(method = %method, url = %url, "issuing API request");

        let mut builder = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Request { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { source })
    }
}
