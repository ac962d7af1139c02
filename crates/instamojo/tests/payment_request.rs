use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use instamojo::{InstamojoError, PaymentRequest, PaymentRequestClient};

fn sample_request() -> PaymentRequest {
    let mut req = PaymentRequest::new("Test payment link", Decimal::from_str("12.3").unwrap());
    req.buyer_name = Some("Aditya Sengupta".to_string());
    req.send_email = true;
    req
}

fn client_for(server: &MockServer) -> PaymentRequestClient {
    PaymentRequestClient::new("test-key", "test-token")
        .with_endpoint(format!("{}/api/1.1/payment-requests/", server.uri()))
}

#[tokio::test]
async fn test_create_sends_credentials_and_form() {
    let server = MockServer::start().await;
    let response_body = json!({
        "success": true,
        "payment_request": {
            "id": "d66cb29dd059482e8072999f995c4eef",
            "purpose": "Test payment link",
            "amount": "12.30",
            "status": "Pending",
            "longurl": "https://www.instamojo.com/@demo/d66cb29dd059482e8072999f995c4eef",
            "shorturl": null
        }
    });

    Mock::given(method("POST"))
        .and(path("/api/1.1/payment-requests/"))
        .and(header("X-Api-Key", "test-key"))
        .and(header("X-Auth-Token", "test-token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("purpose=Test+payment+link"))
        .and(body_string_contains("amount=12.30"))
        .and(body_string_contains("buyer_name=Aditya+Sengupta"))
        .and(body_string_contains("send_email=True"))
        .and(body_string_contains("send_sms=False"))
        .respond_with(ResponseTemplate::new(201).set_body_json(response_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let resp = client.create(&sample_request()).await.unwrap();

    assert_eq!(resp, response_body);
}

#[tokio::test]
async fn test_unset_optionals_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.create(&sample_request()).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let keys: Vec<String> = url::form_urlencoded::parse(&received[0].body)
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(keys.contains(&"buyer_name".to_string()));
    for absent in ["email", "phone", "webhook", "redirect_url"] {
        assert!(!keys.iter().any(|k| k == absent), "{absent} should not be sent");
    }
}

#[tokio::test]
async fn test_client_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    let error_body = r#"{"success": false, "message": {"amount": ["Amount must be at least 9."]}}"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(error_body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create(&sample_request()).await.unwrap_err();

    match err {
        InstamojoError::Remote { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, error_body);
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create(&sample_request()).await.unwrap_err();

    assert!(matches!(
        err,
        InstamojoError::Remote { status: 503, ref body } if body == "upstream unavailable"
    ));
}

#[tokio::test]
async fn test_non_json_success_is_serde_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create(&sample_request()).await.unwrap_err();
    assert!(matches!(err, InstamojoError::Serde(_)));
}
