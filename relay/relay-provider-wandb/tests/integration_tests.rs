use relay_core::{MockHttpTransport, RelayError, ReqwestTransport};
use relay_provider_wandb::{RunPath, SplitFrame, WandbClient, WandbClientConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WandbClient<ReqwestTransport> {
    let config = WandbClientConfig {
        base_url: format!("{}/", server.uri()),
        ..Default::default()
    };
    WandbClient::with_config(ReqwestTransport::new(), "secret", config)
}

fn history_response(rows: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {"project": {"run": {"history": rows}}}
    }))
}

#[tokio::test]
async fn test_fetch_run_history_split_frame() {
    let mock_server = MockServer::start().await;

    // "api:secret" in base64
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Basic YXBpOnNlY3JldA=="))
        .and(body_partial_json(json!({
            "variables": {"entity": "acme", "project": "vision", "name": "abc123", "samples": 500}
        })))
        .respond_with(history_response(&[
            r#"{"_step": 0, "loss": 0.9, "_runtime": 1.5}"#,
            r#"{"_step": 1, "loss": 0.7, "lr": 0.001}"#,
        ]))
        .expect(1)
        .mount(&mock_server)
        .await;

    let frame = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "vision", "abc123"))
        .await
        .unwrap();

    assert_eq!(
        frame,
        SplitFrame {
            columns: vec!["_step".into(), "loss".into(), "_runtime".into(), "lr".into()],
            index: vec![0, 1],
            data: vec![
                vec![json!(0), json!(0.9), json!(1.5), json!(null)],
                vec![json!(1), json!(0.7), json!(null), json!(0.001)],
            ],
        }
    );
}

#[tokio::test]
async fn test_fetch_run_history_non_finite_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(history_response(&[r#"{"_step": 0, "grad_norm": NaN}"#]))
        .mount(&mock_server)
        .await;

    let frame = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "vision", "abc123"))
        .await
        .unwrap();

    assert_eq!(frame.data, vec![vec![json!(0), json!(null)]]);
}

#[tokio::test]
async fn test_missing_run_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"project": {"run": null}}})),
        )
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "vision", "gone"))
        .await
        .unwrap_err();

    match err {
        RelayError::NotFound(what) => assert_eq!(what, "run acme/vision/gone"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"project": null}})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "nope", "abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::NotFound(ref what) if what == "project acme/nope"));
}

#[tokio::test]
async fn test_graphql_errors_are_remote_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "permission denied"}, {"message": "try again"}]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "vision", "abc123"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "remote error: permission denied; try again");
}

#[tokio::test]
async fn test_auth_failure_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .fetch_run_history(&RunPath::new("acme", "vision", "abc123"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Http { status: 401, ref body } if body == "unauthorized"));
}

#[tokio::test]
async fn test_empty_api_key_sends_nothing() {
    let mut transport = MockHttpTransport::new();
    transport.expect_post().times(0);

    let client = WandbClient::new(transport, "");
    let err = client
        .fetch_run_history(&RunPath::new("acme", "vision", "abc123"))
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::Usage(_)));
}

#[test]
fn test_build_request_targets_graphql_endpoint() {
    let client = WandbClient::new(MockHttpTransport::new(), "key");
    let request = client
        .build_request(&RunPath::new("acme", "vision", "abc123"))
        .unwrap();

    assert_eq!(request.url, "https://api.wandb.ai/graphql");
    assert_eq!(request.basic_auth, Some(("api".to_string(), "key".to_string())));

    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert!(body["query"].as_str().unwrap().contains("history(samples: $samples)"));
    assert_eq!(body["variables"]["name"], "abc123");
}
