/// Webhook payload parsing.
///
/// Mailgun posts delivery events either as a JSON document (current
/// webhooks, with or without the `event-data` wrapper) or as flat
/// form/query fields (legacy webhooks). Each encoding has its own strategy;
/// strategies are tried in order and the first event found wins.
use super::values::{
    bool_at, double_at, from_unix_seconds, int_at, non_blank_string_at, parse_double, parse_int,
    string_at, string_list_at, string_map_at, text_at, timestamp_at, value_at,
};
use crate::models::{MailgunWebhookEvent, RequestAdaptorContext};
use serde_json::Value;
use tracing::debug;

type Strategy = fn(&dyn RequestAdaptorContext) -> Option<MailgunWebhookEvent>;

const STRATEGIES: [(&str, Strategy); 2] = [("json", json_strategy), ("form", parse_form)];

/// Parses the callback into an event, or `None` when no strategy finds an event name
pub fn parse_event(context: &dyn RequestAdaptorContext) -> Option<MailgunWebhookEvent> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let event = strategy(context)?;
        debug!(strategy = %name, event = %event.event, "Parsed Mailgun webhook");
        Some(event)
    })
}

fn json_strategy(context: &dyn RequestAdaptorContext) -> Option<MailgunWebhookEvent> {
    context
        .content()
        .filter(|content| !content.trim().is_empty())
        .and_then(parse_json)
}

/// Parses a JSON webhook document; malformed JSON yields `None`
pub fn parse_json(content: &str) -> Option<MailgunWebhookEvent> {
    let root: Value = match serde_json::from_str(content) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "Webhook content is not JSON");
            return None;
        }
    };
    let data = event_data(&root);

    // A blank name on the event element does not fall through to the root
    let name = string_at(data, &["event"])
        .or_else(|| string_at(&root, &["event"]))
        .filter(|name| !name.trim().is_empty())?;
    let mut event = MailgunWebhookEvent::new(name);

    event.message_id = header_message_id(data)
        .or_else(|| string_at(data, &["message-id"]))
        .or_else(|| string_at(data, &["message_id"]))
        .or_else(|| header_message_id(&root));

    event.delivery_code = int_at(data, &["delivery-status", "code"]);
    event.delivery_message = string_at(data, &["delivery-status", "message"]);
    event.delivery_description = string_at(data, &["delivery-status", "description"]);
    event.delivery_mx_host = string_at(data, &["delivery-status", "mx-host"]);
    event.delivery_tls = bool_at(data, &["delivery-status", "tls"]);
    event.delivery_utf8 = bool_at(data, &["delivery-status", "utf8"]);
    event.delivery_certificate_verified = bool_at(data, &["delivery-status", "certificate-verified"]);
    event.delivery_attempt_no = int_at(data, &["delivery-status", "attempt-no"]);
    event.delivery_session_seconds = double_at(data, &["delivery-status", "session-seconds"]);
    event.delivery_reason = string_at(data, &["reason"]);

    event.id = string_at(data, &["id"]);
    event.log_level = first_string(data, &["log-level", "log_level"]);
    event.timestamp = timestamp_at(data, &["timestamp"]).or_else(|| timestamp_at(&root, &["timestamp"]));

    event.recipient = string_at(data, &["recipient"]);
    event.recipient_domain = first_string(data, &["recipient-domain", "recipient_domain"]);
    event.message_to = string_at(data, &["message", "headers", "to"]);
    event.message_from = string_at(data, &["message", "headers", "from"]);
    event.message_subject = string_at(data, &["message", "headers", "subject"]);
    event.message_size = int_at(data, &["message", "size"]);

    event.envelope_transport = string_at(data, &["envelope", "transport"]);
    event.envelope_sender = string_at(data, &["envelope", "sender"]);
    event.envelope_sending_ip = string_at(data, &["envelope", "sending-ip"]);
    event.envelope_targets = string_at(data, &["envelope", "targets"]);
    event.storage_url = string_at(data, &["storage", "url"]);
    event.storage_key = string_at(data, &["storage", "key"]);

    event.flag_is_routed = bool_at(data, &["flags", "is-routed"]);
    event.flag_is_authenticated = bool_at(data, &["flags", "is-authenticated"]);
    event.flag_is_system_test = bool_at(data, &["flags", "is-system-test"]);
    event.flag_is_test_mode = bool_at(data, &["flags", "is-test-mode"]);

    event.tags = string_list_at(data, &["tags"]);
    event.user_variables =
        string_map_at(data, &["user-variables"]).or_else(|| string_map_at(data, &["user_variables"]));

    event.signature_token = string_at(&root, &["signature", "token"]);
    event.signature_timestamp = text_at(&root, &["signature", "timestamp"]);
    event.signature_value = string_at(&root, &["signature", "signature"]);

    Some(event)
}

/// Parses flat key/value fields (legacy form webhooks)
pub fn parse_form(context: &dyn RequestAdaptorContext) -> Option<MailgunWebhookEvent> {
    let value = |key: &str| context.value(key).map(str::to_string);

    let name = value("event").filter(|e| !e.trim().is_empty())?;
    let mut event = MailgunWebhookEvent::new(name);

    event.message_id = value("message-id")
        .or_else(|| value("Message-Id"))
        .or_else(|| value("message_id"));
    event.delivery_code = context.value("code").and_then(parse_int);
    event.delivery_message = value("message");
    event.delivery_description = value("description");
    event.delivery_reason = value("reason");
    event.recipient = value("recipient");
    event.recipient_domain = value("recipient-domain").or_else(|| value("recipient_domain"));

    event.signature_token = value("token");
    event.signature_timestamp = value("timestamp");
    event.signature_value = value("signature");
    event.timestamp = context
        .value("timestamp")
        .and_then(parse_double)
        .and_then(from_unix_seconds);

    Some(event)
}

/// `event-data`, then `event_data`, else the document itself
fn event_data(root: &Value) -> &Value {
    value_at(root, &["event-data"])
        .or_else(|| value_at(root, &["event_data"]))
        .unwrap_or(root)
}

fn header_message_id(element: &Value) -> Option<String> {
    non_blank_string_at(element, &["message", "headers", "message-id"])
        .or_else(|| non_blank_string_at(element, &["message", "headers", "Message-Id"]))
}

fn first_string(element: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| string_at(element, &[*key]))
}
