/// Mailgun Channel Core - Mailgun email channel provider
///
/// Translates the generic outbound email model into Mailgun's multipart
/// message payload, and folds Mailgun delivery webhooks back into generic
/// delivery reports.
pub mod config;
pub mod constants;
pub mod email;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod webhook;

// Re-export commonly used types
pub use config::MailgunOptions;
pub use error::{DispatchFailure, MailgunError};
pub use services::dispatcher::EmailChannelProviderDispatcher;
pub use services::provider::MailgunChannelProvider;
pub use webhook::adaptor::{DeliveryReportRequestAdaptor, EmailDeliveryStatusReportAdaptor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
