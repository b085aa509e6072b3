/// Extended properties: provider-specific fields carried through the
/// host's generic message and report objects.
///
/// The host only sees an opaque map of namespace -> JSON value. Each provider
/// owns one namespace and reads/writes it through a fixed typed struct.
use super::template::AmpTemplate;
use crate::constants::EMAIL_PROPERTIES_KEY;
use crate::error::MailgunError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtendedProperties(HashMap<String, Value>);

impl ExtendedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value stored under `namespace`; malformed content reads as absent
    pub fn get<T: DeserializeOwned>(&self, namespace: &str) -> Option<T> {
        let value = self.0.get(namespace)?;
        match serde_json::from_value(value.clone()) {
            Ok(typed) => Some(typed),
            Err(e) => {
                tracing::debug!(namespace = %namespace, error = %e, "Ignoring malformed extended properties");
                None
            }
        }
    }

    /// Stores `value` under `namespace`, replacing what was there
    pub fn set<T: Serialize>(&mut self, namespace: &str, value: &T) -> Result<(), MailgunError> {
        let value = serde_json::to_value(value)?;
        self.0.insert(namespace.to_string(), value);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mailgun options for a single outbound email.
///
/// Every field is optional; an unset field is omitted from the payload
/// rather than sent empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dkim: Option<bool>,
    /// Secondary signing domain, `domain` or `domain/selector`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_dkim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_dkim_public: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_clicks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_pixel_location_top: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sending_ip: Option<String>,
    /// Raw Mailgun fields (e.g. `v:customer-id`) passed through verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amp_html: Option<AmpTemplate>,
}

impl EmailProperties {
    pub fn from_extended(properties: &ExtendedProperties) -> Self {
        properties.get(EMAIL_PROPERTIES_KEY).unwrap_or_default()
    }

    pub fn apply_to(&self, properties: &mut ExtendedProperties) -> Result<(), MailgunError> {
        properties.set(EMAIL_PROPERTIES_KEY, self)
    }

    pub fn has_template(&self) -> bool {
        self.template
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}
