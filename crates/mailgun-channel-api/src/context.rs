/// API Context - shared state for all API handlers
use mailgun_channel_core::services::provider::provider_id_for;
use mailgun_channel_core::{DeliveryReportRequestAdaptor, EmailDeliveryStatusReportAdaptor};
use std::sync::Arc;
use tracing::info;

/// Adaptors tried, in order, for every inbound callback
#[derive(Clone)]
pub struct ApiContext {
    pub provider_id: String,
    pub adaptors: Vec<Arc<dyn DeliveryReportRequestAdaptor>>,
}

impl ApiContext {
    pub fn new(adaptors: Vec<Arc<dyn DeliveryReportRequestAdaptor>>, provider_id: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            provider_id: provider_id.into(),
            adaptors,
        })
    }

    /// Mailgun email adaptor only; `provider_id` is an optional `Mailgun.<suffix>` suffix
    pub fn mailgun(provider_id: Option<&str>) -> Arc<Self> {
        let provider_id = provider_id_for(provider_id);
        let adaptor = EmailDeliveryStatusReportAdaptor::with_provider_id(provider_id.clone());
        Self::new(vec![Arc::new(adaptor)], provider_id)
    }

    /// Reads the optional `MAILGUN_PROVIDER_ID` suffix from the environment
    pub fn from_env() -> Result<Arc<Self>, lambda_http::Error> {
        let suffix = std::env::var("MAILGUN_PROVIDER_ID").ok();
        let ctx = Self::mailgun(suffix.as_deref());

        info!(provider_id = %ctx.provider_id, adaptors = ctx.adaptors.len(), "API context initialized");
        Ok(ctx)
    }
}
