mod common;

use common::{CountingTransport, Output};
use relay_cli::config::Settings;
use relay_cli::fetch_wandb_data::run_fetch_wandb_data;
use relay_cli::Outcome;
use serde_json::json;

async fn run(argv: &[&str], settings: &Settings, transport: CountingTransport) -> (Outcome, Output) {
    let mut output = Output::default();
    let outcome = run_fetch_wandb_data(
        argv.iter().copied(),
        settings,
        transport,
        &mut output.stdout,
        &mut output.stderr,
    )
    .await;
    (outcome, output)
}

#[tokio::test]
async fn test_prints_split_history() {
    let body = json!({
        "data": {"project": {"run": {"history": [
            "{\"_step\": 0, \"loss\": 2.0}",
            "{\"_step\": 1, \"loss\": 1.0, \"acc\": 0.5}"
        ]}}}
    })
    .to_string();
    let transport = CountingTransport::responding(200, &body);
    let settings = Settings {
        wandb_base_url: Some("http://tracking.local".to_string()),
        ..Default::default()
    };

    let (outcome, output) = run(
        &["fetch-wandb-data", "acme", "vision", "abc123", "secret"],
        &settings,
        transport.clone(),
    )
    .await;

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(
        output.stdout(),
        "{\"columns\":[\"_step\",\"loss\",\"acc\"],\"index\":[0,1],\"data\":[[0,2.0,null],[1,1.0,0.5]]}\n"
    );

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "http://tracking.local/graphql");
    assert_eq!(request.basic_auth, Some(("api".to_string(), "secret".to_string())));
}

#[tokio::test]
async fn test_missing_run_fails() {
    let transport = CountingTransport::responding(200, r#"{"data": {"project": {"run": null}}}"#);

    let (outcome, output) = run(
        &["fetch-wandb-data", "acme", "vision", "gone", "secret"],
        &Settings::default(),
        transport,
    )
    .await;

    assert_eq!(outcome, Outcome::Failure);
    assert!(output.stdout.is_empty());
    assert!(output.stderr().contains("run acme/vision/gone"));
}

#[tokio::test]
async fn test_missing_api_key_is_usage_error() {
    let transport = CountingTransport::responding(200, "{}");

    let (outcome, _) = run(
        &["fetch-wandb-data", "acme", "vision", "abc123"],
        &Settings::default(),
        transport.clone(),
    )
    .await;

    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(transport.calls(), 0);
}
