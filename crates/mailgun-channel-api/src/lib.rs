/// Mailgun Channel API - delivery report receiver Lambda
///
/// Accepts Mailgun webhook callbacks, runs them through the registered
/// delivery report adaptors and logs the resulting reports.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    body::Body as AxumBody,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use lambda_http::{Body, Error as LambdaError, Request, Response};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Mailgun caps webhook payloads well below this
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Builds the axum router serving `/v1`
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let v1_router = Router::new()
        .route("/health", get(api::health::handler))
        .route("/delivery-reports", post(api::webhooks::delivery_reports));

    Router::new()
        .nest("/v1", v1_router)
        .route_layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(ctx)
}

/// Main API handler - converts Lambda HTTP request to Axum router
pub async fn handler(ctx: Arc<ApiContext>, event: Request) -> Result<Response<Body>, LambdaError> {
    info!("Processing API request: {} {}", event.method(), event.uri().path());

    let (parts, body) = event.into_parts();
    let axum_request = http::Request::from_parts(parts, AxumBody::from(body.to_vec()));

    match router(ctx).oneshot(axum_request).await {
        Ok(response) => {
            let (parts, body) = response.into_parts();
            let body_bytes = axum::body::to_bytes(body, usize::MAX)
                .await
                .unwrap_or_default();

            Ok(Response::from_parts(parts, Body::from(body_bytes.to_vec())))
        }
        Err(err) => {
            error!("Axum router error: {}", err);
            let response = Response::builder().status(500).body(Body::from(
                serde_json::json!({
                    "error": "Internal server error"
                })
                .to_string(),
            ))?;
            Ok(response)
        }
    }
}
