/// Delivery report adaptor for Mailgun email callbacks
use super::{classifier::classify, parser::parse_event};
use crate::constants::{CHANNEL_ID_KEY, CHANNEL_PROVIDER_ID_KEY, EMAIL_CHANNEL_ID, PROVIDER_ID};
use crate::models::{DeliveryReport, RequestAdaptorContext};
use crate::utils::logging::safe_event_context;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Turns an inbound callback into delivery reports.
///
/// `None` means the callback is not for this adaptor, so the host can offer
/// it to the next one.
#[async_trait]
pub trait DeliveryReportRequestAdaptor: Send + Sync {
    async fn adapt(&self, context: &dyn RequestAdaptorContext) -> Option<Vec<DeliveryReport>>;
}

#[derive(Debug, Clone)]
pub struct EmailDeliveryStatusReportAdaptor {
    provider_id: String,
}

impl Default for EmailDeliveryStatusReportAdaptor {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailDeliveryStatusReportAdaptor {
    pub fn new() -> Self {
        Self {
            provider_id: PROVIDER_ID.to_string(),
        }
    }

    /// Provider id stamped on emitted reports
    pub fn with_provider_id(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Channel must be `Email` and provider id must start with `Mailgun`, both ignoring case
    pub fn is_relevant(context: &dyn RequestAdaptorContext) -> bool {
        let channel_matches = context
            .value(CHANNEL_ID_KEY)
            .is_some_and(|channel| channel.eq_ignore_ascii_case(EMAIL_CHANNEL_ID));
        let provider_matches = context
            .value(CHANNEL_PROVIDER_ID_KEY)
            .is_some_and(starts_with_provider_id);

        channel_matches && provider_matches
    }
}

fn starts_with_provider_id(value: &str) -> bool {
    value
        .get(..PROVIDER_ID.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(PROVIDER_ID))
}

#[async_trait]
impl DeliveryReportRequestAdaptor for EmailDeliveryStatusReportAdaptor {
    #[tracing::instrument(name = "mailgun.adapt", skip_all, fields(provider_id = %self.provider_id))]
    async fn adapt(&self, context: &dyn RequestAdaptorContext) -> Option<Vec<DeliveryReport>> {
        if !Self::is_relevant(context) {
            debug!("Callback is not for the Mailgun email channel");
            return None;
        }

        let Some(event) = parse_event(context) else {
            debug!("No Mailgun event found in callback");
            return None;
        };

        let status = classify(Some(&event.event), event.delivery_code, event.detail());
        let resource_id = event
            .message_id
            .clone()
            .or_else(|| context.resource_id().map(str::to_string));

        let mut report = DeliveryReport::status_changed(EMAIL_CHANNEL_ID, &self.provider_id, status)
            .with_pipeline(
                context.pipeline_intent().map(str::to_string),
                context.pipeline_id().map(str::to_string),
            )
            .with_resource_id(resource_id);

        if let Err(e) = report.apply_mailgun_event(&event) {
            warn!(error = %e, "Failed to attach Mailgun event to delivery report");
        }

        info!(
            event = %safe_event_context(&event),
            status_code = report.status.code(),
            "Adapted Mailgun delivery event"
        );

        Some(vec![report])
    }
}
