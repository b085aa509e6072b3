/// Per-call context for outbound dispatch and inbound webhook adaption
use crate::constants::{PIPELINE_ID_KEY, PIPELINE_INTENT_KEY, RESOURCE_ID_KEY};
use crate::services::template::{StaticTemplateEngine, TemplateEngine};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Context for a single outbound send
#[derive(Clone, TypedBuilder)]
pub struct DispatchContext {
    /// Template variables; sent as `h:X-Mailgun-Variables` when present
    #[builder(default, setter(strip_option))]
    pub content_model: Option<Value>,
    #[builder(default, setter(into, strip_option))]
    pub locale: Option<String>,
    #[builder(default = Arc::new(StaticTemplateEngine))]
    pub template_engine: Arc<dyn TemplateEngine>,
    #[builder(default, setter(into, strip_option))]
    pub channel_id: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub channel_provider_id: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pipeline_intent: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub pipeline_id: Option<String>,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchContext")
            .field("has_content_model", &self.content_model.is_some())
            .field("locale", &self.locale)
            .field("channel_id", &self.channel_id)
            .field("channel_provider_id", &self.channel_provider_id)
            .field("pipeline_intent", &self.pipeline_intent)
            .field("pipeline_id", &self.pipeline_id)
            .finish()
    }
}

/// Read access to an inbound delivery callback.
///
/// Values are looked up in query parameters, then form fields, then headers,
/// then the legacy accessor; the first source holding the key wins.
pub trait RequestAdaptorContext: Send + Sync {
    /// Raw request body
    fn content(&self) -> Option<&str>;

    fn query_value(&self, key: &str) -> Option<&str>;

    fn form_value(&self, key: &str) -> Option<&str>;

    fn header_value(&self, key: &str) -> Option<&str>;

    /// Values supplied outside the HTTP request by older hosts
    fn legacy_value(&self, _key: &str) -> Option<&str> {
        None
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.query_value(key)
            .or_else(|| self.form_value(key))
            .or_else(|| self.header_value(key))
            .or_else(|| self.legacy_value(key))
    }

    fn resource_id(&self) -> Option<&str> {
        self.value(RESOURCE_ID_KEY)
    }

    fn pipeline_intent(&self) -> Option<&str> {
        self.value(PIPELINE_INTENT_KEY)
    }

    fn pipeline_id(&self) -> Option<&str> {
        self.value(PIPELINE_ID_KEY)
    }
}

/// Owned inbound request data, as captured by an HTTP receiver
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    content: Option<String>,
    query: HashMap<String, String>,
    form: HashMap<String, String>,
    headers: HashMap<String, String>,
    values: HashMap<String, String>,
}

impl InboundRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(key.into(), value.into());
        self
    }

    /// Header names are matched case-insensitively
    pub fn with_header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds every pair of an `application/x-www-form-urlencoded` string to the form map
    pub fn with_form_encoded(mut self, encoded: &str) -> Self {
        for (key, value) in url::form_urlencoded::parse(encoded.as_bytes()) {
            self.form.entry(key.into_owned()).or_insert(value.into_owned());
        }
        self
    }

    /// Adds every pair of a query string to the query map
    pub fn with_query_string(mut self, query: &str) -> Self {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            self.query.entry(key.into_owned()).or_insert(value.into_owned());
        }
        self
    }
}

impl RequestAdaptorContext for InboundRequest {
    fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    fn form_value(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }

    fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn legacy_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
