/// Maps a Mailgun HTTP response onto a dispatch result
use super::transport::TransportResponse;
use crate::constants::PROVIDER_ID;
use crate::error::DispatchFailure;
use crate::models::{CommunicationsStatus, DispatchResult};
use crate::webhook::normalize_sub_code;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const DISPATCHED_LABEL: &str = "Dispatched";
const ERROR_LABEL: &str = "Error";
const DEFAULT_FAILURE_MESSAGE: &str = "Mailgun request failed.";

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Never fails; unreadable bodies only lose the parsed id or message
pub fn map_dispatch_response(response: &TransportResponse) -> DispatchResult {
    let detail = (!response.body.is_empty()).then(|| response.body.clone());
    let sub_code = normalize_sub_code(Some(i32::from(response.status)));

    if response.is_success() {
        let resource_id = try_deserialize::<SendResponse>(&response.body).and_then(|r| r.id);
        return DispatchResult {
            status: CommunicationsStatus::success(PROVIDER_ID, DISPATCHED_LABEL, sub_code, detail),
            resource_id,
            failure: None,
        };
    }

    let message = try_deserialize::<ErrorResponse>(&response.body)
        .and_then(|r| r.message)
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

    DispatchResult {
        status: CommunicationsStatus::server_error(PROVIDER_ID, ERROR_LABEL, sub_code, detail),
        resource_id: None,
        failure: Some(DispatchFailure {
            message,
            status_code: response.status,
            body: response.body.clone(),
        }),
    }
}

fn try_deserialize<T: DeserializeOwned>(content: &str) -> Option<T> {
    if content.trim().is_empty() {
        return None;
    }
    serde_json::from_str(content).ok()
}
