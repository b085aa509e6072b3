/// Generic outbound email model
use super::properties::ExtendedProperties;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub address: String,
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Formats as `Display Name <address>`, or the bare address when unnamed
impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => write!(f, "{} <{}>", name, self.address),
            _ => f.write_str(&self.address),
        }
    }
}

impl From<&str> for EmailAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// File attached to an outbound email.
///
/// An attachment without content is skipped when the payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailAttachment {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub content: Option<Bytes>,
}

impl EmailAttachment {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            content_type: Some(content_type.into()),
            content: Some(content.into()),
        }
    }

    /// Attachment without a name; a positional default is used on the wire
    pub fn unnamed(content: impl Into<Bytes>) -> Self {
        Self {
            name: None,
            content_type: None,
            content: Some(content.into()),
        }
    }
}

/// Email handed to the dispatcher by the host pipeline
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct OutboundEmail {
    #[builder(default, setter(into, strip_option))]
    pub from: Option<EmailAddress>,
    #[builder(default)]
    pub to: Vec<EmailAddress>,
    #[builder(default)]
    pub cc: Vec<EmailAddress>,
    #[builder(default)]
    pub bcc: Vec<EmailAddress>,
    #[builder(default)]
    pub reply_to: Vec<EmailAddress>,
    #[builder(default, setter(into, strip_option))]
    pub subject: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub text_body: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub html_body: Option<String>,
    #[builder(default)]
    pub attachments: Vec<EmailAttachment>,
    #[builder(default)]
    pub extended_properties: ExtendedProperties,
}

impl OutboundEmail {
    /// Combined To + Cc + Bcc count
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }
}
