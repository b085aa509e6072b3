/// Mailgun channel provider registration
use super::dispatcher::EmailChannelProviderDispatcher;
use crate::config::MailgunOptions;
use crate::constants::{EMAIL_CHANNEL_ID, PROVIDER_ID};
use crate::error::MailgunError;
use crate::webhook::EmailDeliveryStatusReportAdaptor;
use std::sync::Arc;

/// Everything a host needs to plug Mailgun in as an email provider
#[derive(Clone)]
pub struct MailgunChannelProvider {
    id: String,
    options: MailgunOptions,
    dispatcher: Arc<EmailChannelProviderDispatcher>,
    adaptor: Arc<EmailDeliveryStatusReportAdaptor>,
}

impl MailgunChannelProvider {
    /// `provider_id` is a suffix; `Some("eu")` registers as `Mailgun.eu`
    pub fn new(options: MailgunOptions, provider_id: Option<&str>) -> Result<Self, MailgunError> {
        let id = provider_id_for(provider_id);
        let dispatcher = EmailChannelProviderDispatcher::from_options(&options)?;
        let adaptor = EmailDeliveryStatusReportAdaptor::with_provider_id(id.clone());

        tracing::info!(provider_id = %id, sending_domain = %options.sending_domain, "Registered Mailgun channel provider");

        Ok(Self {
            id,
            options,
            dispatcher: Arc::new(dispatcher),
            adaptor: Arc::new(adaptor),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn supported_channels(&self) -> &[&'static str] {
        &[EMAIL_CHANNEL_ID]
    }

    pub fn supports_channel(&self, channel_id: &str) -> bool {
        channel_id.eq_ignore_ascii_case(EMAIL_CHANNEL_ID)
    }

    pub fn options(&self) -> &MailgunOptions {
        &self.options
    }

    pub fn dispatcher(&self) -> Arc<EmailChannelProviderDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn adaptor(&self) -> Arc<EmailDeliveryStatusReportAdaptor> {
        Arc::clone(&self.adaptor)
    }
}

/// `Mailgun`, or `Mailgun.<suffix>` for a non-blank suffix
pub fn provider_id_for(suffix: Option<&str>) -> String {
    match suffix.map(str::trim).filter(|s| !s.is_empty()) {
        Some(suffix) => format!("{}.{}", PROVIDER_ID, suffix),
        None => PROVIDER_ID.to_string(),
    }
}
