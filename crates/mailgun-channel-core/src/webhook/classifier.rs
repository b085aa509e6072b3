/// Maps Mailgun event names onto the generic status taxonomy
use crate::constants::{MAX_SUB_CODE, PROVIDER_ID};
use crate::models::{CommunicationsStatus, StatusCategory};

const UNKNOWN_LABEL: &str = "Unknown";

/// Classifies an event; the trimmed event name becomes the status label.
///
/// Unmapped or blank names yield `ClientError` labelled `Unknown` with
/// sub-code 0 and no detail.
pub fn classify(
    event_name: Option<&str>,
    sub_code: Option<i32>,
    detail: Option<&str>,
) -> CommunicationsStatus {
    let Some(name) = event_name.map(str::trim).filter(|n| !n.is_empty()) else {
        return unknown();
    };

    let Some(category) = category_for(name) else {
        return unknown();
    };

    CommunicationsStatus::new(
        category,
        PROVIDER_ID,
        name,
        normalize_sub_code(sub_code),
        detail.map(str::to_string),
    )
}

/// Codes outside `0..=999`, or no code at all, normalize to 0
pub fn normalize_sub_code(code: Option<i32>) -> u16 {
    match code {
        Some(code) if (0..=MAX_SUB_CODE).contains(&code) => code as u16,
        _ => 0,
    }
}

fn category_for(name: &str) -> Option<StatusCategory> {
    match name.to_ascii_lowercase().as_str() {
        "accepted" | "queued" | "sending" | "stored" | "delayed" => Some(StatusCategory::Info),
        "delivered" | "opened" | "clicked" => Some(StatusCategory::Success),
        "unsubscribed" | "complained" | "spam" => Some(StatusCategory::ClientError),
        "bounced" | "failed" | "rejected" | "dropped" => Some(StatusCategory::ServerError),
        _ => None,
    }
}

fn unknown() -> CommunicationsStatus {
    CommunicationsStatus::client_error(PROVIDER_ID, UNKNOWN_LABEL, 0, None)
}
