/// Email dispatcher: payload builder, transport call and result mapping
use super::mapper::map_dispatch_response;
use super::transport::{MessageTransport, ReqwestTransport};
use crate::config::MailgunOptions;
use crate::constants::SEND_MESSAGE_PATH;
use crate::email::build_message_payload;
use crate::error::MailgunError;
use crate::models::{DispatchContext, DispatchResult, OutboundEmail};
use crate::utils::logging::{redact_email, safe_email_context};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub struct EmailChannelProviderDispatcher<T = ReqwestTransport> {
    transport: T,
}

impl EmailChannelProviderDispatcher<ReqwestTransport> {
    /// Validates the options and builds the reqwest transport
    pub fn from_options(options: &MailgunOptions) -> Result<Self, MailgunError> {
        options
            .validate()
            .map_err(|e| MailgunError::Config(format!("Invalid configuration: {}", e)))?;
        Ok(Self::new(ReqwestTransport::new(options)?))
    }
}

impl<T: MessageTransport> EmailChannelProviderDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Sends one email.
    ///
    /// Validation failures return `Err` before any network call. A completed
    /// HTTP exchange always yields exactly one result, failed or not.
    /// Cancellation is only observed while waiting on the network.
    #[tracing::instrument(
        name = "mailgun.dispatch",
        skip_all,
        fields(
            recipients = email.recipient_count(),
            pipeline_id = context.pipeline_id.as_deref().unwrap_or_default()
        )
    )]
    pub async fn dispatch(
        &self,
        email: &OutboundEmail,
        context: &DispatchContext,
        cancel: &CancellationToken,
    ) -> Result<Vec<DispatchResult>, MailgunError> {
        let payload = build_message_payload(email, context).await?;
        info!(email = %safe_email_context(email), parts = payload.len(), "Sending email via Mailgun");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Mailgun dispatch cancelled");
                return Err(MailgunError::Cancelled);
            }
            response = self.transport.post_form(SEND_MESSAGE_PATH, payload) => response?,
        };

        let result = map_dispatch_response(&response);
        match &result.failure {
            None => info!(
                status = response.status,
                resource_id = result.resource_id.as_deref().unwrap_or_default(),
                "Dispatched email via Mailgun"
            ),
            Some(failure) => warn!(
                status = failure.status_code,
                error = %redact_email(&failure.message),
                "Mailgun rejected email"
            ),
        }

        Ok(vec![result])
    }
}
