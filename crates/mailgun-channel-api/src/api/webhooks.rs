/// Delivery report webhook endpoint
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
};
use mailgun_channel_core::models::InboundRequest;
use mailgun_channel_core::utils::logging::redact_email;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::context::ApiContext;
use crate::error::ApiError;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryReportsResponse {
    pub reports: usize,
}

/// Runs the callback through each adaptor in order; the first one that
/// claims it produces the reports
pub async fn delivery_reports(
    State(ctx): State<Arc<ApiContext>>,
    request: Request,
) -> Result<Json<DeliveryReportsResponse>, ApiError> {
    let path = request.uri().path().to_string();
    let inbound = inbound_request(request).await?;

    for adaptor in &ctx.adaptors {
        let Some(reports) = adaptor.adapt(&inbound).await else {
            continue;
        };

        for report in &reports {
            info!(
                event_name = %report.event_name,
                channel_provider_id = %report.channel_provider_id,
                resource_id = %redact_email(report.resource_id.as_deref().unwrap_or_default()),
                status = %report.status.label,
                status_code = report.status.code(),
                "Delivery report received"
            );
        }

        return Ok(Json(DeliveryReportsResponse {
            reports: reports.len(),
        }));
    }

    debug!(path = %path, "No adaptor accepted the callback");
    Err(ApiError::NotAcceptable(
        "No delivery report adaptor accepted the callback".to_string(),
    ))
}

/// Captures query, headers and body.
///
/// Url-encoded bodies also fill the form map. Multipart bodies fill it from
/// their text fields and carry no raw content.
async fn inbound_request(request: Request) -> Result<InboundRequest, ApiError> {
    let mut inbound =
        InboundRequest::new().with_query_string(request.uri().query().unwrap_or_default());

    for (name, value) in request.headers() {
        if let Ok(value) = value.to_str() {
            inbound = inbound.with_header(name.as_str(), value);
        }
    }

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with(MULTIPART_FORM_DATA) {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?;
        return multipart_fields(inbound, multipart).await;
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read request body: {}", e)))?;
    let content = std::str::from_utf8(&body)
        .map_err(|e| ApiError::BadRequest(format!("Request body is not UTF-8: {}", e)))?;

    if content.trim().is_empty() {
        return Ok(inbound);
    }

    if content_type.starts_with(FORM_URLENCODED) {
        inbound = inbound.with_form_encoded(content);
    }

    Ok(inbound.with_content(content))
}

/// Adds every named text field; file parts (stored message attachments) are skipped
async fn multipart_fields(
    mut inbound: InboundRequest,
    mut multipart: Multipart,
) -> Result<InboundRequest, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart field: {}", e)))?
    {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart field '{}': {}", name, e)))?;
        inbound = inbound.with_form(name, value);
    }

    Ok(inbound)
}
