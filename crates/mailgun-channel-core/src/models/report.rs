/// Generic delivery report emitted for inbound webhooks
use super::events::MailgunWebhookEvent;
use super::properties::ExtendedProperties;
use super::status::CommunicationsStatus;
use crate::constants::{EMAIL_PROPERTIES_KEY, STATUS_CHANGED_EVENT};
use crate::error::MailgunError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReport {
    pub event_name: String,
    pub channel_id: String,
    pub channel_provider_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub status: CommunicationsStatus,
    #[serde(default, skip_serializing_if = "ExtendedProperties::is_empty")]
    pub extended_properties: ExtendedProperties,
}

impl DeliveryReport {
    pub fn status_changed(
        channel_id: impl Into<String>,
        channel_provider_id: impl Into<String>,
        status: CommunicationsStatus,
    ) -> Self {
        Self {
            event_name: STATUS_CHANGED_EVENT.to_string(),
            channel_id: channel_id.into(),
            channel_provider_id: channel_provider_id.into(),
            pipeline_intent: None,
            pipeline_id: None,
            resource_id: None,
            status,
            extended_properties: ExtendedProperties::new(),
        }
    }

    pub fn with_pipeline(mut self, intent: Option<String>, id: Option<String>) -> Self {
        self.pipeline_intent = intent;
        self.pipeline_id = id;
        self
    }

    pub fn with_resource_id(mut self, resource_id: Option<String>) -> Self {
        self.resource_id = resource_id;
        self
    }

    /// Stores the full Mailgun event in the report's extended properties
    pub fn apply_mailgun_event(&mut self, event: &MailgunWebhookEvent) -> Result<(), MailgunError> {
        self.extended_properties.set(EMAIL_PROPERTIES_KEY, event)
    }

    /// The Mailgun event carried by this report, if any
    pub fn mailgun_event(&self) -> Option<MailgunWebhookEvent> {
        self.extended_properties.get(EMAIL_PROPERTIES_KEY)
    }
}
