use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tavus::patch::PatchOperation;
use tavus::resources::{CreatePersona, CreateVideo};
use tavus::{Client, ErrorKind, JsonPatch, Params};

fn client_for(uri: &str) -> Client {
    Client::builder().api_key("k").base_url(uri).build().unwrap()
}

#[tokio::test]
async fn test_create_persona_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/personas"))
        .and(header("x-api-key", "k"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({"system_prompt": "p"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"persona_id": "p123"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        client_for(&uri)
            .personas()
            .create(CreatePersona::new().system_prompt("p"))
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), json!({"persona_id": "p123"}));
}

#[tokio::test]
async fn test_video_without_source_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        client_for(&uri).videos().create(CreateVideo::new("r1"))
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Argument);
}

#[tokio::test]
async fn test_guardrails_patch_body_is_operation_array() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v2/guardrails/g1"))
        .and(body_json(json!([{"op": "replace", "path": "/data/0/x", "value": "y"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        client_for(&uri)
            .guardrails()
            .patch("g1", &[PatchOperation::replace("/data/0/x", "y")])
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), json!({}));
}

#[tokio::test]
async fn test_rate_limit_ignores_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": "too many requests"})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || client_for(&uri).conversations().get("c1"))
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.to_string(), "Rate limit exceeded");
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_validation_error_message_from_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/objectives"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"error": "objective_name is required"})),
        )
        .mount(&server)
        .await;

    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        client_for(&uri)
            .objectives()
            .create(vec![json!({"objective_prompt": "Ask a question"})])
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.message(), "objective_name is required");
}

#[tokio::test]
async fn test_authentication_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/replicas"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid key"})))
        .mount(&server)
        .await;

    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || client_for(&uri).replicas().list(&Params::new()))
        .await
        .unwrap()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), "Invalid key");
}

#[tokio::test]
async fn test_no_content_yields_success_marker() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/videos/v1"))
        .and(query_param("hard", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || client_for(&uri).videos().delete("v1", true))
        .await
        .unwrap();

    assert_eq!(result.unwrap(), json!({"success": true}));
}

#[tokio::test]
async fn test_malformed_success_body_is_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/documents"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let uri = server.uri();

    let result = tokio::task::spawn_blocking(move || {
        client_for(&uri).documents().list(&Params::new().limit(10))
    })
    .await
    .unwrap();

    assert_eq!(result.unwrap(), json!({}));
}

#[tokio::test]
async fn test_timeout_surfaces_as_generic_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let uri = server.uri();

    let err = tokio::task::spawn_blocking(move || {
        Client::builder()
            .api_key("k")
            .base_url(&uri)
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap()
            .personas()
            .get("p1")
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), None);
    assert!(err.message().starts_with("Request failed: "));
}

#[tokio::test]
async fn test_absolute_path_never_leaves_the_api_host() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let uri = server.uri();
    let foreign = format!("{}/v2/personas", uri);

    let err = tokio::task::spawn_blocking(move || {
        client_for(&uri).get(&foreign, &Params::new())
    })
    .await
    .unwrap()
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_connection_refused_surfaces_as_generic_error() {
    let client = client_for("http://127.0.0.1:1");

    let err = client.personas().list(&Params::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), None);
    assert!(err.message().starts_with("Request failed: "));
}
