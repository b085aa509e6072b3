/// Application constants
///
/// Provider identifiers, Mailgun wire field names and limits used across the
/// outbound and webhook paths.
// ============================================================================
// Identifiers
// ============================================================================
/// Channel provider id; custom provider ids are `Mailgun.<suffix>`
pub const PROVIDER_ID: &str = "Mailgun";

/// Channel id handled by this provider
pub const EMAIL_CHANNEL_ID: &str = "Email";

/// Namespace key for Mailgun properties inside a generic extended-property bag
pub const EMAIL_PROPERTIES_KEY: &str = "Mailgun.Email";

/// Event kind emitted for every adapted webhook
pub const STATUS_CHANGED_EVENT: &str = "StatusChanged";

// ============================================================================
// API Defaults
// ============================================================================

/// Default Mailgun API host (US region)
pub const DEFAULT_API_HOST: &str = "https://api.mailgun.net";

/// Mailgun API host for the EU region
pub const EU_API_HOST: &str = "https://api.eu.mailgun.net";

/// Default Mailgun API version segment
pub const DEFAULT_API_VERSION: &str = "v3";

/// Basic auth user name expected by Mailgun
pub const API_USER: &str = "api";

/// Relative path of the send-message endpoint under the domain base URL
pub const SEND_MESSAGE_PATH: &str = "messages";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Limits
// ============================================================================

/// Maximum combined To + Cc + Bcc recipients per message
pub const MAX_RECIPIENTS: usize = 1000;

/// Largest sub-code a status may carry
pub const MAX_SUB_CODE: i32 = 999;

// ============================================================================
// Inbound Context Keys
// ============================================================================

/// Context key carrying the channel id of a delivery callback
pub const CHANNEL_ID_KEY: &str = "channel-id";

/// Context key carrying the channel provider id of a delivery callback
pub const CHANNEL_PROVIDER_ID_KEY: &str = "channel-provider-id";

/// Context key carrying the resource id of a delivery callback
pub const RESOURCE_ID_KEY: &str = "resource-id";

/// Context key carrying the pipeline intent of a delivery callback
pub const PIPELINE_INTENT_KEY: &str = "pipeline-intent";

/// Context key carrying the pipeline id of a delivery callback
pub const PIPELINE_ID_KEY: &str = "pipeline-id";

/// Mailgun multipart form field names
pub mod field {
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const CC: &str = "cc";
    pub const BCC: &str = "bcc";
    pub const SUBJECT: &str = "subject";
    pub const TEXT: &str = "text";
    pub const HTML: &str = "html";
    pub const AMP_HTML: &str = "amp-html";
    pub const TEMPLATE: &str = "template";
    pub const TEMPLATE_VERSION: &str = "t:version";
    pub const TAG: &str = "o:tag";
    pub const DKIM: &str = "o:dkim";
    pub const SECONDARY_DKIM: &str = "o:secondary-dkim";
    pub const SECONDARY_DKIM_PUBLIC: &str = "o:secondary-dkim-public";
    pub const TEST_MODE: &str = "o:testmode";
    pub const TRACKING: &str = "o:tracking";
    pub const TRACKING_CLICKS: &str = "o:tracking-clicks";
    pub const TRACKING_OPENS: &str = "o:tracking-opens";
    pub const TRACKING_PIXEL_LOCATION: &str = "o:tracking-pixel-location";
    pub const REQUIRE_TLS: &str = "o:require-tls";
    pub const SENDING_IP: &str = "o:sending-ip";
    pub const REPLY_TO: &str = "h:Reply-To";
    pub const TEMPLATE_VARIABLES: &str = "h:X-Mailgun-Variables";
    pub const ATTACHMENT: &str = "attachment";
}
