//! Error taxonomy for tool invocations.
//!
//! Three failure families exist: the remote API refused or broke the HTTP
//! exchange ([`ApiError`]), the caller asked for something the catalog does
//! not offer ([`UnknownToolError`], [`ToolDisabledError`]), or the caller's
//! arguments did not match the declared schema ([`InvalidArgumentsError`]).
//! All of them are caught at the dispatch boundary and surfaced as an
//! error-flagged tool result; none escapes an invocation.

use thiserror::Error;

/// Failure of a single HTTP exchange with the spreadsheet API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("API request failed: {source}")]
    Request { source: reqwest::Error },

    /// The API answered with a non-success status. Carries the raw body text
    /// so the caller sees whatever the service had to say.
    #[error("API call failed: {status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A 2xx response whose body was not valid JSON.
    #[error("failed to decode API response: {source}")]
    Decode { source: reqwest::Error },
}

#[derive(Debug, Error)]
#[error("Unknown tool: {name}")]
pub struct UnknownToolError {
    pub name: String,
}

impl UnknownToolError {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Argument object did not deserialize into the tool's params struct.
#[derive(Debug, Error)]
#[error("Invalid arguments for tool '{tool}': {source}")]
pub struct InvalidArgumentsError {
    pub tool: String,
    #[source]
    pub source: serde_json::Error,
}

impl InvalidArgumentsError {
    pub fn new(tool: &str, source: serde_json::Error) -> Self {
        Self {
            tool: tool.to_string(),
            source,
        }
    }
}

#[derive(Debug, Error)]
#[error("tool '{name}' is disabled by server configuration")]
pub struct ToolDisabledError {
    pub name: String,
}

impl ToolDisabledError {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
        }
    }
}
