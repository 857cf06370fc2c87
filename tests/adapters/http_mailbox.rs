use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use retention_probe::adapters::{HttpMailboxAdapter, Lookup, MailboxAdapter, MailboxState};
use retention_probe::core::Alias;
use retention_probe::error::AdapterError;

fn adapter(server: &MockServer) -> HttpMailboxAdapter {
    HttpMailboxAdapter::new(
        reqwest::Client::new(),
        &format!("{}/adminapi/", server.uri()),
        Some("mail-token"),
    )
}

#[tokio::test]
async fn active_mailbox_lookup_maps_holds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/JDOE"))
        .and(query_param("softDeleted", "false"))
        .and(header("authorization", "Bearer mail-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "mbx-42",
            "displayName": "Jane Doe",
            "primarySmtpAddress": "jdoe@contoso.com",
            "litigationHoldEnabled": true,
            "inPlaceHolds": ["UniH7c1f", "mbx9a"],
            "retentionPolicy": "Legal 7y"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let alias = Alias::parse("jdoe").unwrap();
    let Lookup::Found(record) = adapter(&server).lookup_mailbox(&alias, false).await.unwrap()
    else {
        panic!("expected an active mailbox");
    };

    assert_eq!(record.id, "mbx-42");
    assert_eq!(record.state, MailboxState::Active);
    assert!(record.litigation_hold);
    assert_eq!(record.in_place_holds, vec!["UniH7c1f", "mbx9a"]);
    assert_eq!(record.retention_policy.as_deref(), Some("Legal 7y"));
    assert!(record.deleted_at.is_none());
    server.verify().await;
}

#[tokio::test]
async fn soft_deleted_lookup_carries_deletion_stamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/JDOE"))
        .and(query_param("softDeleted", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "mbx-42",
            "whenSoftDeleted": "03/02/2026 14:00:00"
        })))
        .mount(&server)
        .await;

    let alias = Alias::parse("jdoe").unwrap();
    let record = adapter(&server)
        .lookup_mailbox(&alias, true)
        .await
        .unwrap()
        .found()
        .unwrap();

    assert_eq!(record.state, MailboxState::SoftDeleted);
    let stamp = record.deleted_at.unwrap();
    assert_eq!(stamp.raw(), "03/02/2026 14:00:00");
    assert!(stamp.parse().is_ok());
}

#[tokio::test]
async fn missing_mailbox_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/JDOE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let alias = Alias::parse("jdoe").unwrap();
    let lookup = adapter(&server).lookup_mailbox(&alias, false).await.unwrap();

    assert_eq!(lookup, Lookup::NotFound);
}

#[tokio::test]
async fn statistics_are_read_by_mailbox_reference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/mbx-42/statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "itemCount": 5,
            "totalItemSizeBytes": 73_400_320
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = adapter(&server).mailbox_statistics("mbx-42").await.unwrap();

    assert_eq!(stats.item_count, 5);
    assert_eq!(stats.total_size_bytes, 73_400_320);
    server.verify().await;
}

#[tokio::test]
async fn statistics_failures_are_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/mbx-42/statistics"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/adminapi/mailboxes/mbx-43/statistics"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let adapter = adapter(&server);

    let missing = adapter.mailbox_statistics("mbx-42").await.unwrap_err();
    assert!(matches!(missing, AdapterError::Decode(_)));

    let upstream = adapter.mailbox_statistics("mbx-43").await.unwrap_err();
    assert!(matches!(
        upstream,
        AdapterError::Status { code: 502, ref message } if message == "bad gateway"
    ));
}
