//! Flat action interface flows: parameter coercion, envelope mapping and
//! the never-faulting error boundary.

use pretty_assertions::assert_eq;
use serde_json::json;
use sma_client::mocks::MockTransport;
use sma_client::{ActionRunner, ActionStatus, AuthMethod, SmaClient, SmaConfig};
use std::sync::Arc;

fn runner_with(transport: Arc<MockTransport>, auth_method: AuthMethod) -> ActionRunner {
    let config = SmaConfig::builder()
        .host("https://sma.example.com")
        .username("admin")
        .passphrase("secret")
        .auth_method(auth_method)
        .build()
        .unwrap();
    ActionRunner::new(SmaClient::with_transport(config, transport))
}

fn basic_runner(transport: Arc<MockTransport>) -> ActionRunner {
    runner_with(transport, AuthMethod::Basic)
}

#[tokio::test]
async fn invalid_order_by_is_rejected_before_any_network_call() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport.clone());

    let envelope = runner
        .run(
            "search_spam_quarantine_messages",
            json!({
                "start_date": "2024-01-01T00:00:00.000Z",
                "end_date": "2024-02-01T00:00:00.000Z",
                "order_by": "invalid_field",
            }),
        )
        .await;

    assert_eq!(envelope.status, ActionStatus::Error);
    assert!(envelope.message.contains("order_by"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn missing_required_date_names_the_field() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport.clone());

    let envelope = runner
        .run("search_spam_quarantine_messages", json!({"end_date": "2024-02-01"}))
        .await;
    assert!(!envelope.is_success());
    assert!(envelope.message.contains("start_date"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn search_envelope_carries_data_and_summary() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({
        "data": [{"mid": 100}, {"mid": 101}],
        "meta": {"totalCount": 57}
    }));

    let runner = basic_runner(transport);
    let envelope = runner
        .run(
            "search_spam_quarantine_messages",
            json!({
                "start_date": "2024-01-01T00:00:00.000Z",
                "end_date": "2024-02-01T00:00:00.000Z",
            }),
        )
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.message, "Successfully retrieved messages");
    assert_eq!(envelope.data.len(), 2);
    assert_eq!(envelope.summary["total_messages"], json!(57));
    assert_eq!(envelope.summary["messages_returned"], json!(2));
}

#[tokio::test]
async fn delete_list_entry_accepts_csv_and_array_equivalently() {
    let expected_payload = json!({
        "quarantineType": "spam",
        "viewBy": "recipient",
        "recipientList": ["a@x.com", "b@x.com"],
    });

    for recipient_list in [json!("a@x.com,b@x.com"), json!(["a@x.com", "b@x.com"])] {
        let transport = Arc::new(MockTransport::new());
        transport.enqueue_json(json!({"data": {"totalCount": 2}}));

        let runner = basic_runner(transport.clone());
        let envelope = runner
            .run(
                "delete_list_entry",
                json!({
                    "list_type": "safelist",
                    "view_by": "recipient",
                    "recipient_list": recipient_list,
                }),
            )
            .await;

        assert!(envelope.is_success(), "{}", envelope.message);
        assert_eq!(envelope.summary["total_deleted"], json!(2));
        assert_eq!(envelope.summary["list_type"], json!("safelist"));
        assert_eq!(envelope.summary["view_by"], json!("recipient"));

        let sent = transport.last_request().unwrap();
        assert!(sent.url.ends_with("/sma/api/v2.0/quarantine/safelist"));
        assert_eq!(sent.body.unwrap(), expected_payload);
    }
}

#[tokio::test]
async fn release_summary_total_matches_submitted_ids() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({"data": {"action": "release", "totalCount": 2}}));

    let runner = basic_runner(transport.clone());
    let envelope = runner
        .run("release_spam_message", json!({"message_id": "100, 101"}))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.summary["total_released"], json!(2));
    assert_eq!(envelope.summary["action"], json!("release"));
    assert_eq!(
        transport.last_request().unwrap().body.unwrap()["mids"],
        json!([100, 101])
    );
}

#[tokio::test]
async fn non_integer_message_id_fails_locally() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport.clone());

    let envelope = runner
        .run("delete_spam_message", json!({"message_id": "abc"}))
        .await;
    assert!(!envelope.is_success());
    assert!(envelope.message.contains("must be a valid integer"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn general_quarantine_actions_require_quarantine_name() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport.clone());

    let envelope = runner
        .run("release_general_quarantine_message", json!({"message_id": 7}))
        .await;
    assert!(!envelope.is_success());
    assert!(envelope.message.contains("quarantine_name"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn unknown_action_is_reported_not_panicked() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport);

    let envelope = runner.run("reboot_appliance", json!({})).await;
    assert!(!envelope.is_success());
    assert!(envelope.message.contains("Unsupported action 'reboot_appliance'"));
}

#[tokio::test]
async fn tracking_details_summary_has_subject_status_direction() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({
        "data": {
            "messages": {
                "subject": "Quarterly report",
                "messageStatus": "Delivered",
                "direction": "incoming"
            }
        }
    }));

    let runner = basic_runner(transport);
    let envelope = runner
        .run("get_message_tracking_details", json!({"mid": 4242}))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.summary["subject"], json!("Quarterly report"));
    assert_eq!(envelope.summary["status"], json!("Delivered"));
    assert_eq!(envelope.summary["direction"], json!("incoming"));
    assert_eq!(envelope.data.len(), 1);
}

#[tokio::test]
async fn message_details_summary_has_subject() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({
        "data": {"attributes": {"subject": "Hello"}}
    }));

    let runner = basic_runner(transport.clone());
    let envelope = runner
        .run("get_general_quarantine_message_details", json!({"message_id": 55}))
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.summary["subject"], json!("Hello"));
    assert!(transport
        .last_request()
        .unwrap()
        .query
        .contains(&("quarantineType".to_string(), "pvo".to_string())));
}

#[tokio::test]
async fn statistics_report_summary_names_report_and_counter() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({"data": {"type": "mail_incoming_traffic_summary"}}));

    let runner = basic_runner(transport);
    let envelope = runner
        .run(
            "get_statistics_report",
            json!({
                "report_type": "mail_incoming_traffic_summary",
                "counter": "total_clean_recipients",
                "start_date": "2024-01-01T00:00+00:00",
                "end_date": "2024-02-01T00:00+00:00",
            }),
        )
        .await;

    assert!(envelope.is_success());
    assert_eq!(
        envelope.summary["report_type"],
        json!("mail_incoming_traffic_summary")
    );
    assert_eq!(envelope.summary["counter"], json!("total_clean_recipients"));
}

#[tokio::test]
async fn download_attachment_summary_names_file() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_binary(
        &b"attachment bytes"[..],
        Some("application/octet-stream"),
        Some(r#"attachment; filename="safe,name.bin""#),
    );

    let runner = basic_runner(transport);
    let envelope = runner
        .run(
            "download_attachment",
            json!({"message_id": 42, "attachment_id": "att-1"}),
        )
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.summary["file_name"], json!("safename.bin"));
    assert_eq!(envelope.summary["size_bytes"], json!(16));
}

#[tokio::test]
async fn remote_failure_becomes_failed_envelope_with_status_and_body() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_error(sma_client::SmaError::Api {
        status: 503,
        body: "maintenance".to_string(),
    });

    let runner = basic_runner(transport);
    let envelope = runner
        .run(
            "search_tracking_messages",
            json!({"start_date": "2024-01-01", "end_date": "2024-02-01"}),
        )
        .await;

    assert!(!envelope.is_success());
    assert!(envelope.message.contains("503"));
    assert!(envelope.message.contains("maintenance"));
}

#[tokio::test]
async fn test_connectivity_reports_through_envelope() {
    let transport = Arc::new(MockTransport::new());
    transport.enqueue_json(json!({"data": {"jwtToken": "abc123"}}));
    transport.enqueue_json(json!({"data": {"jwtToken": "abc123"}}));

    let runner = runner_with(transport, AuthMethod::Jwt);
    let envelope = runner.run("test_connectivity", json!({})).await;
    assert!(envelope.is_success());
    assert_eq!(envelope.message, "Test Connectivity Passed");
}

#[tokio::test]
async fn add_list_entry_requires_paired_fields_per_view() {
    let transport = Arc::new(MockTransport::new());
    let runner = basic_runner(transport.clone());

    // Recipient view without the paired sender list
    let envelope = runner
        .run(
            "add_list_entry",
            json!({
                "view_by": "recipient",
                "recipient_addresses": "user@corp.com",
            }),
        )
        .await;
    assert!(!envelope.is_success());
    assert!(envelope.message.contains("sender_list"));
    assert_eq!(transport.request_count(), 0);
}
