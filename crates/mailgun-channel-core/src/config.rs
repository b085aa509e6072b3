/// Mailgun provider configuration
use crate::constants::{DEFAULT_API_HOST, DEFAULT_API_VERSION, DEFAULT_TIMEOUT_SECS, EU_API_HOST};
use crate::error::MailgunError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Connection settings shared read-only by every dispatch
#[derive(Clone, Deserialize, Serialize)]
pub struct MailgunOptions {
    pub api_key: String,
    pub sending_domain: String,
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_user_agent() -> String {
    format!("mailgun-channel/{}", crate::VERSION)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl MailgunOptions {
    pub fn new(api_key: impl Into<String>, sending_domain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sending_domain: sending_domain.into(),
            api_host: default_api_host(),
            api_version: default_api_version(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Loads options from `MAILGUN_*` environment variables
    pub fn from_env() -> Result<Self, MailgunError> {
        let api_key = std::env::var("MAILGUN_API_KEY")
            .map_err(|_| MailgunError::Config("Missing MAILGUN_API_KEY env var".to_string()))?;
        let sending_domain = std::env::var("MAILGUN_SENDING_DOMAIN").map_err(|_| {
            MailgunError::Config("Missing MAILGUN_SENDING_DOMAIN env var".to_string())
        })?;

        let mut options = Self::new(api_key, sending_domain);

        if let Ok(region) = std::env::var("MAILGUN_REGION") {
            options.api_host = region_api_host(&region)
                .ok_or_else(|| MailgunError::Config(format!("Unknown MAILGUN_REGION: {}", region)))?
                .to_string();
        }
        if let Ok(host) = std::env::var("MAILGUN_API_HOST") {
            options.api_host = host;
        }
        if let Ok(version) = std::env::var("MAILGUN_API_VERSION") {
            options.api_version = version;
        }
        if let Ok(user_agent) = std::env::var("MAILGUN_USER_AGENT") {
            options.user_agent = user_agent;
        }
        if let Ok(timeout) = std::env::var("MAILGUN_TIMEOUT_SECS") {
            options.timeout_secs = timeout.trim().parse().map_err(|_| {
                MailgunError::Config(format!("Invalid MAILGUN_TIMEOUT_SECS: {}", timeout))
            })?;
        }

        options
            .validate()
            .map_err(|e| MailgunError::Config(format!("Invalid configuration: {}", e)))?;

        tracing::info!(
            api_host = %options.api_host,
            sending_domain = %options.sending_domain,
            "Mailgun configuration validated successfully"
        );

        Ok(options)
    }

    /// Validates configuration is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key not configured".to_string());
        }

        if self.sending_domain.trim().is_empty() {
            return Err("Sending domain not configured".to_string());
        }

        if self.api_host.trim().is_empty() {
            return Err("API host not configured".to_string());
        }

        if self.api_version.trim_matches('/').trim().is_empty() {
            return Err("API version not configured".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be > 0".to_string());
        }

        Ok(())
    }

    /// Base URL of the domain-scoped API: `{host}/{version}/{domain}/`
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.api_host.trim().trim_end_matches('/'),
            self.api_version.trim().trim_matches('/'),
            self.sending_domain.trim().trim_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// API host of a Mailgun region (`us` or `eu`)
fn region_api_host(region: &str) -> Option<&'static str> {
    match region.trim().to_ascii_lowercase().as_str() {
        "us" => Some(DEFAULT_API_HOST),
        "eu" => Some(EU_API_HOST),
        _ => None,
    }
}

impl fmt::Debug for MailgunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunOptions")
            .field("api_key", &"***")
            .field("sending_domain", &self.sending_domain)
            .field("api_host", &self.api_host)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_separators() {
        let options = MailgunOptions::new("key-test", "/mg.example.com/")
            .with_api_host("https://api.mailgun.test/")
            .with_api_version("/v3/");

        assert_eq!(
            options.base_url(),
            "https://api.mailgun.test/v3/mg.example.com/"
        );
    }

    #[test]
    fn test_defaults() {
        let options = MailgunOptions::new("key-test", "mg.example.com");
        assert_eq!(options.base_url(), "https://api.mailgun.net/v3/mg.example.com/");
        assert!(options.user_agent.starts_with("mailgun-channel/"));
        assert_eq!(options.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        assert!(MailgunOptions::new("key", "mg.example.com").validate().is_ok());
        assert!(MailgunOptions::new(" ", "mg.example.com").validate().is_err());
        assert!(MailgunOptions::new("key", "").validate().is_err());
        assert!(
            MailgunOptions::new("key", "mg.example.com")
                .with_api_version("/")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_region_api_host() {
        assert_eq!(region_api_host("EU"), Some("https://api.eu.mailgun.net"));
        assert_eq!(region_api_host(" us "), Some(DEFAULT_API_HOST));
        assert_eq!(region_api_host("apac"), None);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let options = MailgunOptions::new("key-secret", "mg.example.com");
        let debug = format!("{:?}", options);
        assert!(!debug.contains("key-secret"));
        assert!(debug.contains("mg.example.com"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"api_key": "key-test", "sending_domain": "mg.example.com"}"#;
        let options: MailgunOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.api_version, "v3");
        assert_eq!(options.api_host, DEFAULT_API_HOST);
    }

    #[test]
    fn test_from_env_missing_vars() {
        unsafe {
            std::env::remove_var("MAILGUN_API_KEY");
        }

        let result = MailgunOptions::from_env();
        assert!(matches!(result, Err(MailgunError::Config(_))));
    }
}
