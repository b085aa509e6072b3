/// HTTP transport for the Mailgun REST API
use crate::config::MailgunOptions;
use crate::constants::API_USER;
use crate::email::FormPayload;
use crate::error::MailgunError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use url::Url;

/// Raw HTTP exchange result; any status code is a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Posts a multipart form to `path`, relative to the domain base URL.
    ///
    /// Errors only when no HTTP response was received.
    async fn post_form(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<TransportResponse, MailgunError>;
}

/// reqwest-backed transport with Basic auth and a fixed base URL
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ReqwestTransport {
    pub fn new(options: &MailgunOptions) -> Result<Self, MailgunError> {
        let base_url = Url::parse(&options.base_url())
            .map_err(|e| MailgunError::Config(format!("Invalid Mailgun base URL: {}", e)))?;

        let user_agent = HeaderValue::from_str(&options.user_agent)
            .map_err(|e| MailgunError::Config(format!("Invalid user agent: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout())
            .build()
            .map_err(|e| MailgunError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: options.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST to `url` authenticated as `api:<key>`
    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        self.client.post(url).basic_auth(API_USER, Some(&self.api_key))
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

#[async_trait]
impl MessageTransport for ReqwestTransport {
    async fn post_form(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<TransportResponse, MailgunError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| MailgunError::Config(format!("Invalid request path '{}': {}", path, e)))?;
        let form = payload.into_multipart()?;

        let response = self
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MailgunError::Transport(format!("Mailgun request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            MailgunError::Transport(format!("Failed to read Mailgun response: {}", e))
        })?;

        Ok(TransportResponse { status, body })
    }
}
