//! Liveness/readiness endpoints for the HTTP transport.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn liveness_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// No connections or caches are held between calls, so readiness has nothing
// extra to probe beyond liveness.
pub async fn readiness_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ready",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
