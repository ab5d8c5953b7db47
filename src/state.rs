//! Shared application state.
//!
//! Nothing here mutates after construction: the configuration is read-only
//! and the gateway is a stateless handle. Concurrent tool invocations share
//! this through an `Arc` with no coordination.

use crate::client::{ApiClient, SheetsGateway};
use crate::config::ServerConfig;
use std::sync::Arc;

pub struct AppState {
    config: Arc<ServerConfig>,
    gateway: Arc<dyn SheetsGateway>,
}

impl AppState {
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let gateway = Arc::new(ApiClient::new(&config));
        Self { config, gateway }
    }

    /// Substitute the gateway, for tests that script API responses.
    pub fn with_gateway(config: Arc<ServerConfig>, gateway: Arc<dyn SheetsGateway>) -> Self {
        Self { config, gateway }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn gateway(&self) -> &dyn SheetsGateway {
        self.gateway.as_ref()
    }
}
