//! Inbound webhook flow: relevance filter, parsing strategies,
//! classification and the reports handed back to the host.
mod common;

use common::{mailgun_fixture_request, mailgun_request};
use mailgun_channel_core::models::{DeliveryReport, InboundRequest, StatusCategory};
use mailgun_channel_core::webhook::{classify, normalize_sub_code};
use mailgun_channel_core::{DeliveryReportRequestAdaptor, EmailDeliveryStatusReportAdaptor};

async fn adapt(request: &InboundRequest) -> Option<Vec<DeliveryReport>> {
    EmailDeliveryStatusReportAdaptor::new().adapt(request).await
}

#[tokio::test]
async fn test_json_delivered_event() {
    let content = r#"{"event-data":{"event":"delivered","message":{"headers":{"message-id":"<msg-1>"}},"delivery-status":{"code":250,"message":"OK"}}}"#;
    let request = mailgun_request().with_content(content);

    let reports = adapt(&request).await.expect("report for delivered event");
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report.event_name, "StatusChanged");
    assert_eq!(report.channel_id, "Email");
    assert_eq!(report.channel_provider_id, "Mailgun");
    assert_eq!(report.resource_id.as_deref(), Some("<msg-1>"));
    assert_eq!(report.status.category, StatusCategory::Success);
    assert_eq!(report.status.label, "delivered");
    assert_eq!(report.status.sub_code, 250);
    assert_eq!(report.status.detail.as_deref(), Some("OK"));
}

#[tokio::test]
async fn test_form_failed_event() {
    let request = mailgun_request()
        .with_form("event", "failed")
        .with_form("message-id", "<msg-2>")
        .with_form("code", "550")
        .with_form("message", "bounce");

    let reports = adapt(&request).await.expect("report for failed event");
    let report = &reports[0];
    assert_eq!(report.resource_id.as_deref(), Some("<msg-2>"));
    assert_eq!(report.status.category, StatusCategory::ServerError);
    assert_eq!(report.status.sub_code, 550);
    assert_eq!(report.status.detail.as_deref(), Some("bounce"));
}

#[tokio::test]
async fn test_other_provider_is_ignored() {
    let request = InboundRequest::new()
        .with_query("channel-id", "Email")
        .with_query("channel-provider-id", "OtherProvider")
        .with_content(common::load_webhook_fixture("delivered.json"));

    assert!(adapt(&request).await.is_none());
}

#[tokio::test]
async fn test_relevance_from_headers_and_legacy_values() {
    let request = InboundRequest::new()
        .with_header("Channel-Id", "EMAIL")
        .with_value("channel-provider-id", "MAILGUN.custom")
        .with_form("event", "clicked");

    let reports = adapt(&request).await.expect("relevant callback");
    assert_eq!(reports[0].status.category, StatusCategory::Success);
}

#[tokio::test]
async fn test_full_event_attached_to_report() {
    let reports = adapt(&mailgun_fixture_request("delivered.json"))
        .await
        .expect("report");
    let event = reports[0].mailgun_event().expect("event on report");

    assert_eq!(event.event, "delivered");
    assert_eq!(event.message_id.as_deref(), Some("<msg-1>"));
    assert_eq!(event.id.as_deref(), Some("CPgfbmQMTCKtHW6uIWtuVe"));
    assert_eq!(event.log_level.as_deref(), Some("info"));
    assert_eq!(event.recipient.as_deref(), Some("alice@example.com"));
    assert_eq!(event.recipient_domain.as_deref(), Some("example.com"));
    assert_eq!(event.message_to.as_deref(), Some("Alice <alice@example.com>"));
    assert_eq!(event.message_from.as_deref(), Some("Bob <bob@mg.example.com>"));
    assert_eq!(event.message_subject.as_deref(), Some("Welcome aboard"));
    assert_eq!(event.message_size, Some(111));
    assert_eq!(event.envelope_transport.as_deref(), Some("smtp"));
    assert_eq!(event.envelope_sender.as_deref(), Some("bob@mg.example.com"));
    assert_eq!(event.envelope_sending_ip.as_deref(), Some("209.61.154.250"));
    assert_eq!(event.envelope_targets.as_deref(), Some("alice@example.com"));
    assert_eq!(event.storage_key.as_deref(), Some("message_key"));
    assert_eq!(event.flag_is_routed, Some(false));
    assert_eq!(event.flag_is_authenticated, Some(true));
    assert_eq!(event.flag_is_system_test, Some(false));
    assert_eq!(event.flag_is_test_mode, Some(false));
    assert_eq!(event.delivery_tls, Some(true));
    assert_eq!(event.delivery_utf8, Some(true));
    assert_eq!(event.delivery_certificate_verified, Some(true));
    assert_eq!(event.delivery_mx_host.as_deref(), Some("smtp-in.example.com"));
    assert_eq!(event.delivery_attempt_no, Some(1));
    assert!(event.delivery_session_seconds.is_some());
    assert_eq!(event.delivery_description.as_deref(), Some(""));
    assert_eq!(
        event.tags,
        Some(vec!["welcome".to_string(), "onboarding".to_string()])
    );

    let variables = event.user_variables.expect("user variables");
    assert_eq!(variables.get("Customer-ID"), Some(Some("42")));
    assert_eq!(variables.get("plan"), Some(None));

    assert_eq!(event.signature_timestamp.as_deref(), Some("1700000000"));
    assert!(event.signature_token.is_some());
    assert!(event.signature_value.is_some());
}

#[tokio::test]
async fn test_fractional_timestamp() {
    let reports = adapt(&mailgun_fixture_request("delivered.json"))
        .await
        .expect("report");
    let timestamp = reports[0].mailgun_event().and_then(|e| e.timestamp).expect("timestamp");

    let whole = chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid instant");
    assert_eq!(timestamp - whole, chrono::Duration::milliseconds(500));
}

#[tokio::test]
async fn test_string_encoded_values_and_empty_collections() {
    let reports = adapt(&mailgun_fixture_request("permanent_failure.json"))
        .await
        .expect("report");
    let report = &reports[0];

    assert_eq!(report.resource_id.as_deref(), Some("<msg-3>"));
    assert_eq!(report.status.category, StatusCategory::ServerError);
    assert_eq!(report.status.sub_code, 550);
    assert_eq!(
        report.status.detail.as_deref(),
        Some("5.1.1 The email account that you tried to reach does not exist.")
    );

    let event = report.mailgun_event().expect("event");
    assert_eq!(event.delivery_reason.as_deref(), Some("bounce"));
    assert_eq!(event.delivery_tls, Some(true));
    assert_eq!(event.delivery_certificate_verified, Some(true));
    assert_eq!(event.delivery_attempt_no, Some(1));
    assert_eq!(event.message_size, Some(2048));
    assert_eq!(event.timestamp.map(|t| t.timestamp_subsec_millis()), Some(250));
    assert!(event.tags.is_none());
    assert!(event.user_variables.is_none());
}

#[tokio::test]
async fn test_unwrapped_underscored_document() {
    let reports = adapt(&mailgun_fixture_request("legacy_flat.json"))
        .await
        .expect("report");
    let report = &reports[0];

    assert_eq!(report.resource_id.as_deref(), Some("<msg-4>"));
    assert_eq!(report.status.category, StatusCategory::Success);

    let event = report.mailgun_event().expect("event");
    assert_eq!(event.recipient_domain.as_deref(), Some("example.com"));
    assert_eq!(event.log_level.as_deref(), Some("info"));
    assert_eq!(event.timestamp.map(|t| t.timestamp()), Some(1_700_000_200));
    assert_eq!(
        event.user_variables.and_then(|v| v.get("campaign").flatten().map(str::to_string)),
        Some("spring".to_string())
    );
}

#[tokio::test]
async fn test_out_of_range_code_normalized() {
    let reports = adapt(&mailgun_fixture_request("out_of_range_code.json"))
        .await
        .expect("report");
    let report = &reports[0];

    assert_eq!(report.status.category, StatusCategory::ServerError);
    assert_eq!(report.status.sub_code, 0);
    assert_eq!(report.status.detail.as_deref(), Some("Mailbox full"));
    assert_eq!(report.mailgun_event().and_then(|e| e.delivery_code), Some(5000));
}

#[tokio::test]
async fn test_malformed_json_falls_back_to_form() {
    let request = mailgun_request()
        .with_content("{\"event-data\": ")
        .with_form("event", "dropped")
        .with_form("Message-Id", "<msg-6>");

    let reports = adapt(&request).await.expect("form fallback");
    assert_eq!(reports[0].resource_id.as_deref(), Some("<msg-6>"));
    assert_eq!(reports[0].status.category, StatusCategory::ServerError);
}

#[tokio::test]
async fn test_no_event_name_anywhere() {
    let request = mailgun_request()
        .with_content(r#"{"event-data": {"message": {}}}"#)
        .with_form("message-id", "<msg-7>");
    assert!(adapt(&request).await.is_none());
}

#[tokio::test]
async fn test_unknown_event_name() {
    let request = mailgun_request()
        .with_form("event", "teleported")
        .with_form("code", "250")
        .with_form("message", "beam me up");

    let reports = adapt(&request).await.expect("report");
    let status = &reports[0].status;
    assert_eq!(status.category, StatusCategory::ClientError);
    assert_eq!(status.label, "Unknown");
    assert_eq!(status.sub_code, 0);
    assert!(status.detail.is_none());
}

#[test]
fn test_all_documented_event_names() {
    let table = [
        (["accepted", "queued", "sending", "stored", "delayed"].as_slice(), StatusCategory::Info),
        (["delivered", "opened", "clicked"].as_slice(), StatusCategory::Success),
        (["unsubscribed", "complained", "spam"].as_slice(), StatusCategory::ClientError),
        (["bounced", "failed", "rejected", "dropped"].as_slice(), StatusCategory::ServerError),
    ];

    let mut seen = 0;
    for (names, category) in table {
        for name in names {
            assert_eq!(classify(Some(*name), Some(1), None).category, category, "{}", name);
            assert_eq!(
                classify(Some(name.to_uppercase().as_str()), None, None).category,
                category
            );
            seen += 1;
        }
    }
    assert_eq!(seen, 15);
}

#[test]
fn test_sub_code_bounds() {
    for code in [0, 1, 250, 550, 999] {
        assert_eq!(normalize_sub_code(Some(code)), code as u16);
    }
    for code in [-1, 1000, 5000, i32::MIN] {
        assert_eq!(normalize_sub_code(Some(code)), 0);
    }
    assert_eq!(normalize_sub_code(None), 0);
}
