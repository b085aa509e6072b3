/// Logging utilities for PII redaction
///
/// Recipient addresses and subjects end up in dispatch and webhook logs;
/// these helpers keep them out of the log stream in clear text.
use crate::models::{MailgunWebhookEvent, OutboundEmail};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use mailgun_channel_core::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// assert_eq!(redact_email("Bounce for test@acme.com"), "Bounce for ***@acme.com");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            match email.find('@') {
                Some(at_pos) => format!("***{}", &email[at_pos..]),
                None => "***@***".to_string(),
            }
        })
        .to_string()
}

/// Fully redacts email addresses, domain included
pub fn redact_email_full(text: &str) -> String {
    EMAIL_PATTERN.replace_all(text, "***@***.***").to_string()
}

/// Redacts subject line for logging (truncates and masks)
///
/// # Examples
/// ```
/// use mailgun_channel_core::utils::logging::redact_subject;
///
/// assert_eq!(redact_subject("Confidential Document"), "Con...[21 chars]");
/// assert_eq!(redact_subject("Hi"), "Hi");
/// ```
pub fn redact_subject(subject: &str) -> String {
    const MAX_VISIBLE_CHARS: usize = 3;
    const MIN_LENGTH_TO_REDACT: usize = 6;

    let length = subject.chars().count();
    if length < MIN_LENGTH_TO_REDACT {
        subject.to_string()
    } else {
        let preview: String = subject.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}...[{} chars]", preview, length)
    }
}

/// Creates safe log context for an outbound email.
///
/// The sender keeps its domain; recipients are fully redacted.
pub fn safe_email_context(email: &OutboundEmail) -> serde_json::Value {
    let recipients: Vec<String> = email
        .to
        .iter()
        .chain(&email.cc)
        .chain(&email.bcc)
        .map(|address| redact_email_full(&address.to_string()))
        .collect();

    serde_json::json!({
        "from": email.from.as_ref().map(|from| redact_email(&from.to_string())),
        "recipients": recipients,
        "subject_preview": email.subject.as_deref().map(redact_subject),
        "attachments": email.attachments.len(),
    })
}

/// Creates safe log context for an inbound webhook event
pub fn safe_event_context(event: &MailgunWebhookEvent) -> serde_json::Value {
    let recipient_domain = event
        .recipient_domain
        .clone()
        .or_else(|| event.recipient.as_deref().map(extract_domain));

    serde_json::json!({
        "event": event.event,
        "message_id": event.message_id,
        "recipient_domain": recipient_domain,
        "delivery_code": event.delivery_code,
    })
}

fn extract_domain(email: &str) -> String {
    email.split('@').nth(1).unwrap_or("unknown").to_string()
}
