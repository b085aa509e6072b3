/// Health check endpoint
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::context::ApiContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub provider_id: String,
    pub adaptors: usize,
}

/// Reports the receiver as healthy while at least one adaptor is registered
pub async fn handler(State(ctx): State<Arc<ApiContext>>) -> Json<HealthResponse> {
    let status = if ctx.adaptors.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        provider_id: ctx.provider_id.clone(),
        adaptors: ctx.adaptors.len(),
    })
}
