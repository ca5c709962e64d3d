//! Message-tracking service flows over a scripted transport.

use pretty_assertions::assert_eq;
use serde_json::json;
use sma_client::mocks::MockTransport;
use sma_client::services::tracking::{TrackingDetailsRequest, TrackingSearchRequest};
use sma_client::services::TrackingServiceTrait;
use sma_client::{AuthMethod, SmaClient, SmaConfig};
use std::sync::Arc;

fn client_with(transport: Arc<MockTransport>) -> SmaClient {
    let config = SmaConfig::builder()
        .host("https://sma.example.com")
        .username("admin")
        .passphrase("secret")
        .auth_method(AuthMethod::Basic)
        .build()
        .unwrap();
    SmaClient::with_transport(config, transport)
}

#[tokio::test]
async fn search_pins_search_option_and_maps_meta() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({
        "data": [{"mid": 1}, {"mid": 2}],
        "meta": {"totalCount": 120, "num_bad_records": 4}
    }));

    let client = client_with(transport.clone());
    let request = TrackingSearchRequest::new("2024-01-01T00:00", "2024-02-01T00:00")
        .sender("spam@bad.com")
        .recipient("user@corp.com")
        .limit(20);
    let response = client.tracking().search(request).await.unwrap();

    assert_eq!(response.data.len(), 2);
    assert_eq!(response.total_count(), 120);
    assert_eq!(response.bad_records(), 4);

    let sent = transport.last_request().unwrap();
    assert!(sent.url.ends_with("/sma/api/v2.0/message-tracking/messages"));
    assert!(sent
        .query
        .contains(&("searchOption".to_string(), "messages".to_string())));
    assert!(sent
        .query
        .contains(&("sender".to_string(), "spam@bad.com".to_string())));
    assert!(sent
        .query
        .contains(&("recipient".to_string(), "user@corp.com".to_string())));
}

#[tokio::test]
async fn search_requires_date_window_locally() {
    let transport = Arc::new(MockTransport::new());
    let client = client_with(transport.clone());

    let err = client
        .tracking()
        .search(TrackingSearchRequest::new("2024-01-01", ""))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("end_date"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn details_unwraps_messages_and_optional_scoping() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({
        "data": {
            "messages": {
                "subject": "Delivery report",
                "messageStatus": "Delivered",
                "direction": "outgoing"
            }
        }
    }));

    let client = client_with(transport.clone());
    let request = TrackingDetailsRequest::new(5150)
        .icid(17)
        .serial_number("4242ABC")
        .window("2024-01-01T00:00", "2024-02-01T00:00");
    let response = client.tracking().details(request).await.unwrap();

    assert_eq!(response.subject().as_deref(), Some("Delivery report"));
    assert_eq!(response.status().as_deref(), Some("Delivered"));
    assert_eq!(response.direction().as_deref(), Some("outgoing"));

    let sent = transport.last_request().unwrap();
    assert!(sent.url.ends_with("/sma/api/v2.0/message-tracking/details"));
    assert!(sent.query.contains(&("mid".to_string(), "5150".to_string())));
    assert!(sent.query.contains(&("icid".to_string(), "17".to_string())));
    assert!(sent
        .query
        .contains(&("serialNumber".to_string(), "4242ABC".to_string())));
    assert!(sent
        .query
        .contains(&("startDate".to_string(), "2024-01-01T00:00".to_string())));
}

#[tokio::test]
async fn identical_searches_return_identical_pages() {
    let transport = Arc::new(MockTransport::new());
    let page = json!({"data": [{"mid": 9}], "meta": {"totalCount": 1}});
    transport.enqueue_json(page.clone());
    transport.enqueue_json(page);

    let client = client_with(transport);
    let request = TrackingSearchRequest::new("2024-01-01", "2024-02-01");
    let first = client.tracking().search(request.clone()).await.unwrap();
    let second = client.tracking().search(request).await.unwrap();
    assert_eq!(first.data, second.data);
    assert_eq!(first.total_count(), second.total_count());
}
