//! Router-level tests for the delivery report receiver

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mailgun_channel_api::{ApiContext, router};
use serde_json::{Value, json};
use tower::ServiceExt;

const MAILGUN_QUERY: &str = "channel-id=Email&channel-provider-id=Mailgun";

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router(ApiContext::mailgun(None))
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn delivery_report_post(query: &str, content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v1/delivery-reports?{}", query))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/v1/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["provider_id"], "Mailgun");
}

#[tokio::test]
async fn test_json_delivered_event() {
    let payload = json!({
        "signature": {"token": "t", "timestamp": "1700000000", "signature": "s"},
        "event-data": {
            "event": "delivered",
            "timestamp": 1700000000.5,
            "recipient": "alice@example.com",
            "delivery-status": {"code": 250, "message": "OK"},
            "message": {"headers": {"message-id": "<msg-1>"}}
        }
    });

    let request = delivery_report_post(MAILGUN_QUERY, "application/json", payload.to_string());
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reports": 1}));
}

#[tokio::test]
async fn test_form_encoded_failed_event() {
    let form = "event=failed&message-id=%3Cmsg-2%3E&code=550&reason=bounce&timestamp=1700000000";
    let request = delivery_report_post(
        MAILGUN_QUERY,
        "application/x-www-form-urlencoded",
        form.to_string(),
    );

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reports"], 1);
}

#[tokio::test]
async fn test_multipart_failed_event() {
    let body = [
        ("event", "failed"),
        ("message-id", "<msg-2>"),
        ("code", "550"),
        ("message", "bounce"),
    ]
    .iter()
    .map(|(name, value)| {
        format!(
            "--mailgun-boundary\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            name, value
        )
    })
    .collect::<String>()
        + "--mailgun-boundary--\r\n";

    let request = delivery_report_post(
        MAILGUN_QUERY,
        "multipart/form-data; boundary=mailgun-boundary",
        body,
    );

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"reports": 1}));
}

#[tokio::test]
async fn test_other_provider_not_accepted() {
    let request = delivery_report_post(
        "channel-id=Email&channel-provider-id=OtherProvider",
        "application/json",
        json!({"event": "delivered"}).to_string(),
    );

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_payload_without_event_not_accepted() {
    let request = delivery_report_post(MAILGUN_QUERY, "application/json", "{}".to_string());

    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::builder()
        .uri("/v1/unknown")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
