/// Template rendering collaborator used for AMP bodies
use crate::error::MailgunError;
use crate::models::TemplateRegistration;
use async_trait::async_trait;
use serde_json::Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Renders a registration against the content model (`Value::Null` when absent)
    async fn render(
        &self,
        registration: &TemplateRegistration,
        model: &Value,
    ) -> Result<String, MailgunError>;
}

/// Returns the registration content unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTemplateEngine;

#[async_trait]
impl TemplateEngine for StaticTemplateEngine {
    async fn render(
        &self,
        registration: &TemplateRegistration,
        _model: &Value,
    ) -> Result<String, MailgunError> {
        Ok(registration.content.clone())
    }
}
