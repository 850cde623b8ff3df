//! Integration tests using wiremock to simulate the admin API.

use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock_client::matcher::equal_to;
use wiremock_client::metadata::AdminRequest;
use wiremock_client::{
    get, post, url_path_equal_to, Client, Error, Request, ResponseSpec, StubRule,
};

fn client_for(mock_server: &MockServer) -> Client {
    Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn example_stub() -> StubRule {
    post(url_path_equal_to("/example"))
        .with_query_param("firstName", equal_to("John").or(equal_to("Jack")))
        .will_return_response(ResponseSpec::new().with_status(200).with_body("hello"))
}

#[tokio::test]
async fn test_stub_for_posts_mapping() {
    let mock_server = MockServer::start().await;
    let rule = example_stub();

    Mock::given(method("POST"))
        .and(path("/__admin/mappings"))
        .and(body_json(serde_json::to_value(&rule).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": rule.uuid()})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.stub_for(&rule).await.unwrap();
}

#[tokio::test]
async fn test_stub_for_rejects_non_created_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/__admin/mappings"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"errors":[{"title":"bad matcher"}]}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.stub_for(&example_stub()).await;

    match result {
        Err(Error::HttpError {
            status,
            expected,
            raw_response,
            ..
        }) => {
            assert_eq!(status.as_u16(), 422);
            assert_eq!(expected.as_u16(), 201);
            assert_eq!(raw_response, r#"{"errors":[{"title":"bad matcher"}]}"#);
        }
        _ => panic!("Expected HttpError, got {:?}", result),
    }
}

#[tokio::test]
async fn test_stub_for_treats_ok_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/__admin/mappings"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.stub_for(&example_stub()).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(200));
}

#[tokio::test]
async fn test_register_then_delete_touches_only_that_mapping() {
    let mock_server = MockServer::start().await;
    let rule = example_stub();

    Mock::given(method("POST"))
        .and(path("/__admin/mappings"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/__admin/mappings/{}", rule.uuid())))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.stub_for(&rule).await.unwrap();
    client.delete_stub(&rule).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);

    let registered: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(registered["uuid"], rule.uuid());

    let deletes: Vec<_> = received
        .iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .collect();
    assert_eq!(deletes.len(), 1);
    assert_eq!(
        deletes[0].url.path(),
        format!("/__admin/mappings/{}", rule.uuid())
    );
}

#[tokio::test]
async fn test_delete_unknown_mapping_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/__admin/mappings/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_stub_by_id("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_clear_reset_and_scenarios() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/__admin/mappings"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/__admin/mappings/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/__admin/scenarios/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.clear().await.unwrap();
    client.reset().await.unwrap();
    client.reset_all_scenarios().await.unwrap();
}

#[tokio::test]
async fn test_query_param_or_scenario() {
    let mock_server = MockServer::start().await;
    let rule = example_stub();

    Mock::given(method("POST"))
        .and(path("/__admin/mappings"))
        .and(body_partial_json(json!({
            "request": {
                "method": "POST",
                "urlPath": "/example",
                "queryParameters": {
                    "firstName": {"or": [{"equalTo": "John"}, {"equalTo": "Jack"}]}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/__admin/requests/count"))
        .and(body_json(json!({"method": "POST", "urlPath": "/example"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 2})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.stub_for(&rule).await.unwrap();

    let criteria = Request::new("POST", url_path_equal_to("/example"));
    assert_eq!(client.get_count_requests(&criteria).await.unwrap(), 2);
    assert!(client.verify(&criteria, 2).await.unwrap());
    assert!(!client.verify(&criteria, 1).await.unwrap());
}

#[tokio::test]
async fn test_count_with_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/__admin/requests/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .get_count_requests(&Request::new("GET", url_path_equal_to("/")))
        .await;

    match result {
        Err(Error::DeserializationFailed {
            raw_response,
            serde_error,
            status,
        }) => {
            assert_eq!(status.as_u16(), 200);
            assert_eq!(raw_response, "invalid json");
            assert!(!serde_error.is_empty());
        }
        _ => panic!("Expected DeserializationFailed, got {:?}", result),
    }
}

#[tokio::test]
async fn test_get_all_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/__admin/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{
                "id": "e1",
                "request": {"url": "/example?firstName=John", "method": "POST"},
                "responseDefinition": {"status": 200, "body": "hello"},
                "wasMatched": true
            }],
            "meta": {"total": 1},
            "requestJournalDisabled": false
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = client.get_all_requests().await.unwrap();

    assert_eq!(all.meta.total, 1);
    assert_eq!(all.requests[0].id, "e1");
    assert_eq!(all.requests[0].request.method, "POST");
    assert_eq!(all.requests[0].response_definition.body, "hello");
    assert!(all.requests[0].was_matched);
}

#[tokio::test]
async fn test_get_request_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/__admin/requests/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e1",
            "request": {"url": "/ping", "method": "GET"},
            "wasMatched": false
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/__admin/requests/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let event = client.get_request_by_id("e1").await.unwrap();
    assert_eq!(event.request.url, "/ping");
    assert!(!event.was_matched);

    let err = client.get_request_by_id("nope").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.raw_response(), Some("Not found"));
}

#[tokio::test]
async fn test_find_and_unmatched_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/__admin/requests/find"))
        .and(body_json(json!({"method": "GET", "urlPath": "/ping"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{"url": "/ping", "method": "GET"}, {"url": "/ping", "method": "GET"}]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/__admin/requests/unmatched"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{"url": "/nowhere", "method": "DELETE"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let found = client
        .find_requests_by_criteria(&Request::new("GET", url_path_equal_to("/ping")))
        .await
        .unwrap();
    assert_eq!(found.requests.len(), 2);

    let unmatched = client.find_unmatched_requests().await.unwrap();
    assert_eq!(unmatched.requests[0].url, "/nowhere");
}

#[tokio::test]
async fn test_delete_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/__admin/requests"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/__admin/requests/e1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/__admin/requests/remove"))
        .and(body_json(json!({"method": "GET", "urlPath": "/ping"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "serveEvents": [{"id": "e2", "request": {"url": "/ping", "method": "GET"}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.delete_all_requests().await.unwrap();
    client.delete_request_by_id("e1").await.unwrap();

    let removed = client
        .delete_requests_by_criteria(&Request::new("GET", url_path_equal_to("/ping")))
        .await
        .unwrap();
    assert_eq!(removed.serve_events.len(), 1);
    assert_eq!(removed.serve_events[0].id, "e2");
}

#[tokio::test]
async fn test_recordings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/__admin/recordings/start"))
        .and(body_json(json!({"targetBaseUrl": "http://upstream.local"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/__admin/recordings/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mappings": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.start_recording("http://upstream.local").await.unwrap();
    client.stop_recording().await.unwrap();
}

#[tokio::test]
async fn test_base_path_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/mock/__admin/mappings"))
        .and(header("X-Test-Run", "ci"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(format!("{}/mock", mock_server.uri()))
        .unwrap()
        .default_header("X-Test-Run", "ci")
        .unwrap()
        .build()
        .unwrap();

    client.clear().await.unwrap();
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/__admin/mappings"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .base_url(mock_server.uri())
        .unwrap()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let result = client.clear().await;
    assert!(matches!(result, Err(Error::Timeout)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = Client::new(format!("http://127.0.0.1:{}", port)).unwrap();
    let result = client.stub_for(&get(url_path_equal_to("/ping"))).await;
    assert!(matches!(result, Err(Error::Network(_))));
}

#[tokio::test]
async fn test_raw_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/__admin/mappings"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_json(json!({"mappings": [], "meta": {"total": 0}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let reply = client
        .call::<(), serde_json::Value>(AdminRequest::new(http::Method::GET, "mappings"), None)
        .await
        .unwrap();

    assert_eq!(reply.status.as_u16(), 200);
    assert_eq!(reply.data["meta"]["total"], 0);
    assert_eq!(reply.header("content-type"), Some("application/json"));
}
