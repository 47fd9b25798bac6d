//! Integration tests for the X API client.
//!
//! These tests run `XClient` against a local mock server and verify request
//! shape, response decoding and status-code mapping.

use purge::auth::{BearerToken, OAuth1Keys};
use purge::{Credentials, Platform, PlatformError, XClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Helpers
// =============================================================================

fn bearer_client(server: &MockServer) -> XClient {
    XClient::new(
        Credentials::Bearer(BearerToken::new("test-token".to_string())),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_base_url(server.uri())
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_who_am_i() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "1234", "name": "Test", "username": "tester"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = bearer_client(&server).who_am_i().await.unwrap();

    assert_eq!(identity.user_id, "1234");
    assert_eq!(identity.at_handle(), "@tester");
}

#[tokio::test]
async fn test_oauth1_requests_are_signed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header_regex(
            "authorization",
            r#"^OAuth .*oauth_consumer_key="ck".*oauth_signature="[^"]+".*oauth_token="tok""#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "1", "username": "signed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = XClient::new(
        Credentials::OAuth1(OAuth1Keys {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "tok".to_string(),
            access_secret: "ts".to_string(),
        }),
        Duration::from_secs(5),
    )
    .unwrap()
    .with_base_url(server.uri());

    let identity = client.who_am_i().await.unwrap();
    assert_eq!(identity.handle, "signed");
}

#[tokio::test]
async fn test_list_user_items_with_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1234/tweets"))
        .and(query_param("max_results", "100"))
        .and(query_param("pagination_token", "next-1"))
        .and(query_param(
            "tweet.fields",
            "created_at,in_reply_to_user_id,author_id",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "10", "text": "hi", "created_at": "2024-01-01T00:00:00.000Z"},
                {"id": "11", "text": "@a yo", "created_at": "2023-12-31T00:00:00.000Z", "in_reply_to_user_id": "77"}
            ],
            "meta": {"result_count": 2, "next_token": "next-2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = bearer_client(&server)
        .list_user_items("1234", Some("next-1"), 100)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].in_reply_to_user_id.as_deref(), Some("77"));
    assert_eq!(page.next_cursor.as_deref(), Some("next-2"));
}

#[tokio::test]
async fn test_last_page_has_no_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1234/tweets"))
        .and(query_param("max_results", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})),
        )
        .mount(&server)
        .await;

    // page sizes below the endpoint minimum are clamped
    let page = bearer_client(&server)
        .list_user_items("1234", None, 1)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert!(page.next_cursor.is_none());
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tweets/55"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let err = bearer_client(&server).delete_item("55").await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after_secs(), Some(7));
}

#[tokio::test]
async fn test_delete_success() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tweets/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"deleted": true}})))
        .expect(1)
        .mount(&server)
        .await;

    bearer_client(&server).delete_item("55").await.unwrap();
}

#[tokio::test]
async fn test_delete_not_confirmed_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tweets/55"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"deleted": false}})),
        )
        .mount(&server)
        .await;

    let err = bearer_client(&server).delete_item("55").await.unwrap_err();
    assert!(matches!(err, PlatformError::Api { status: 200, .. }));
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tweets/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tweets/500"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&server)
        .await;

    let client = bearer_client(&server);

    assert!(matches!(
        client.who_am_i().await.unwrap_err(),
        PlatformError::Unauthorized(_)
    ));
    assert!(matches!(
        client.delete_item("404").await.unwrap_err(),
        PlatformError::NotFound(_)
    ));
    match client.delete_item("500").await.unwrap_err() {
        PlatformError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "over capacity");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = bearer_client(&server).who_am_i().await.unwrap_err();
    assert!(matches!(err, PlatformError::Serialization(_)));
}

#[tokio::test]
async fn test_hung_request_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "1", "username": "slow"}}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = XClient::new(
        Credentials::Bearer(BearerToken::new("t".to_string())),
        Duration::from_millis(200),
    )
    .unwrap()
    .with_base_url(server.uri());

    let err = client.who_am_i().await.unwrap_err();
    assert!(matches!(err, PlatformError::Timeout));
}
