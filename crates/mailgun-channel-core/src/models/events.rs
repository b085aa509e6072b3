/// Normalized Mailgun webhook event
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One delivery-lifecycle event reported by Mailgun.
///
/// Only `event` is guaranteed; every other field is whatever the payload
/// carried and could be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailgunWebhookEvent {
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    // Delivery status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_mx_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_utf8: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_certificate_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_attempt_no: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_session_seconds: Option<f64>,

    // Event timing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    // Flags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_is_routed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_is_authenticated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_is_system_test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_is_test_mode: Option<bool>,

    // Envelope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_transport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_sending_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_targets: Option<String>,

    // Stored message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variables: Option<UserVariables>,

    // Recipient and message headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_size: Option<i32>,

    // Webhook signature (captured, not verified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_value: Option<String>,
}

impl MailgunWebhookEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Default::default()
        }
    }

    /// First present of delivery message, reason and description
    pub fn detail(&self) -> Option<&str> {
        self.delivery_message
            .as_deref()
            .or(self.delivery_reason.as_deref())
            .or(self.delivery_description.as_deref())
    }
}

/// Custom variables attached to a message, keyed case-insensitively.
///
/// Keys keep the spelling of their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserVariables(BTreeMap<String, Option<String>>);

impl UserVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        let existing = self
            .0
            .keys()
            .find(|k| k.eq_ignore_ascii_case(&name))
            .cloned();
        self.0.insert(existing.unwrap_or(name), value);
    }

    /// Looks up a variable ignoring key case; `Some(None)` is an explicit null
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
