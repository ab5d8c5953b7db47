//! Shared test plumbing: a scripted gateway standing in for the remote API,
//! and helpers for driving the dispatcher.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use sheetlink_mcp::client::{ApiRequest, SheetsGateway};
use sheetlink_mcp::config::{ServerConfig, TransportKind};
use sheetlink_mcp::error::ApiError;
use sheetlink_mcp::server::SheetsServer;
use sheetlink_mcp::state::AppState;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Replays queued responses in order and records every request it sees.
/// An empty queue answers `null`, which suits tools that ignore the body.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, value: Value) {
        self.responses.lock().push_back(Ok(value));
    }

    pub fn push_status(&self, status: u16, status_text: &str, body: &str) {
        self.responses.lock().push_back(Err(ApiError::Status {
            status,
            status_text: status_text.to_string(),
            body: body.to_string(),
        }));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl SheetsGateway for ScriptedGateway {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.requests.lock().push(RecordedRequest {
            method: request.method.to_string(),
            path: request.path.clone(),
            query: request
                .query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            body: request.body.clone(),
        });
        self.responses.lock().pop_front().unwrap_or(Ok(Value::Null))
    }
}

pub fn test_config(enabled_tools: Option<HashSet<String>>) -> ServerConfig {
    ServerConfig {
        api_key: "test-key".to_string(),
        base_url: "https://api.sheetlink.test".to_string(),
        enabled_tools,
        transport: TransportKind::Stdio,
        http_bind_address: "127.0.0.1:0".parse().unwrap(),
    }
}

pub fn server(gateway: Arc<ScriptedGateway>) -> SheetsServer {
    server_with_config(gateway, test_config(None))
}

pub fn server_with_config(gateway: Arc<ScriptedGateway>, config: ServerConfig) -> SheetsServer {
    let state = AppState::with_gateway(Arc::new(config), gateway);
    SheetsServer::from_state(Arc::new(state))
}

/// Convenience around `SheetsServer::dispatch` taking a JSON object literal.
pub async fn call(
    server: &SheetsServer,
    name: &str,
    arguments: Value,
) -> rmcp::model::CallToolResult {
    let arguments = arguments
        .as_object()
        .cloned()
        .expect("tool arguments must be a JSON object");
    server.dispatch(name, arguments).await
}

pub fn result_text(result: &rmcp::model::CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|content| content.as_text().map(|text| text.text.clone()))
        .collect::<Vec<_>>()
        .join("\n")
}
