use relay_core::contracts::{GenerationParameters, GenerationRequest};
use relay_core::logging::RelayLogger;
use relay_core::{HttpRequest, HttpTransport, RelayError, RelayResult, ReqwestTransport};
use serde_json::Value;
use std::sync::Arc;

const APPLICATION_JSON: &str = "application/json";

/// Configuration for a [`TgiClient`].
#[derive(Debug, Clone, Default)]
pub struct TgiClientConfig {
    /// Parameter set sent with every request.
    pub parameters: GenerationParameters,
    /// Optional logger for requests and responses.
    pub logger: Option<Arc<dyn RelayLogger>>,
}

/// Client for a Text Generation Inference style `generate` endpoint.
///
/// Each call to [`TgiClient::generate`] is one independent POST: no retries,
/// no streaming and no state carried between calls.
pub struct TgiClient<T: HttpTransport> {
    transport: T,
    config: TgiClientConfig,
}

impl<T: HttpTransport> TgiClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, TgiClientConfig::default())
    }

    pub fn with_config(transport: T, config: TgiClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.config.parameters
    }

    /// Builds the exact request [`TgiClient::generate`] would send.
    pub fn build_request(&self, endpoint_url: &str, prompt: &str) -> RelayResult<HttpRequest> {
        if endpoint_url.trim().is_empty() {
            return Err(RelayError::Usage("endpoint URL must not be empty".to_string()));
        }

        let body = GenerationRequest::new(prompt, self.config.parameters.clone()).to_body()?;

        Ok(HttpRequest::post(endpoint_url, body)
            .header("accept", APPLICATION_JSON)
            .header("Content-Type", APPLICATION_JSON))
    }

    /// Posts `prompt` to `endpoint_url` and returns the decoded response body.
    ///
    /// Only status 200 counts as success. Any other status yields
    /// [`RelayError::Http`] with the raw body; a 200 whose body is not JSON
    /// yields [`RelayError::Decode`].
    pub async fn generate(&self, endpoint_url: &str, prompt: &str) -> RelayResult<Value> {
        let request = self.build_request(endpoint_url, prompt)?;

        if let Some(logger) = &self.config.logger {
            let request_json = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
            logger.log_request("generate", endpoint_url, &request_json);
        }

        let response = self.transport.post(request).await?;
        let status = response.status;
        let decoded = response.json::<Value>();

        if let Some(logger) = &self.config.logger {
            match &decoded {
                Ok(json) => logger.log_response("generate", endpoint_url, status, json),
                Err(_) => {
                    let raw = Value::String(response.text());
                    logger.log_response("generate", endpoint_url, status, &raw);
                }
            }
        }

        response.check_status(|status| status == 200).inspect_err(|_| {
            tracing::debug!(url = endpoint_url, status, "generation request rejected");
        })?;
        decoded
    }
}

/// Sends one generation request with the default parameter set.
pub async fn generate_text(endpoint_url: &str, prompt: &str) -> RelayResult<Value> {
    TgiClient::new(ReqwestTransport::new())
        .generate(endpoint_url, prompt)
        .await
}

/// Pulls `generated_text` out of a generation response.
///
/// Accepts a single object or an array of objects (some hosting layers wrap
/// the result in a one-element array). Returns `None` unless every candidate
/// carries a string `generated_text`.
pub fn generated_text(response: &Value) -> Option<Vec<&str>> {
    match response {
        Value::Object(map) => map.get("generated_text")?.as_str().map(|text| vec![text]),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.get("generated_text")?.as_str())
            .collect(),
        _ => None,
    }
}
