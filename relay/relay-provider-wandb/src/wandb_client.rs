use relay_core::logging::RelayLogger;
use relay_core::{HttpRequest, HttpTransport, RelayError, RelayResult, ReqwestTransport};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::contracts::models::{
    GraphQlRequest, GraphQlResponse, RUN_FULL_HISTORY_QUERY, RunHistoryData, RunHistoryVariables,
};
use crate::split_frame::{SplitFrame, normalize_non_finite};

pub const DEFAULT_BASE_URL: &str = "https://api.wandb.ai";
pub const DEFAULT_SAMPLES: u32 = 500;

/// Identifies one tracked run as `entity/project/run_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPath {
    pub entity: String,
    pub project: String,
    pub run_id: String,
}

impl RunPath {
    pub fn new(
        entity: impl Into<String>,
        project: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            project: project.into(),
            run_id: run_id.into(),
        }
    }
}

impl fmt::Display for RunPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.entity, self.project, self.run_id)
    }
}

#[derive(Debug, Clone)]
pub struct WandbClientConfig {
    /// Tracking service root, e.g. "https://api.wandb.ai".
    pub base_url: String,
    /// Number of history rows the service samples.
    pub samples: u32,
    pub logger: Option<Arc<dyn RelayLogger>>,
}

impl Default for WandbClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            samples: DEFAULT_SAMPLES,
            logger: None,
        }
    }
}

/// Reads run history from the Weights & Biases GraphQL API.
pub struct WandbClient<T: HttpTransport> {
    transport: T,
    api_key: String,
    config: WandbClientConfig,
}

impl<T: HttpTransport> WandbClient<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self::with_config(transport, api_key, WandbClientConfig::default())
    }

    pub fn with_config(transport: T, api_key: impl Into<String>, config: WandbClientConfig) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            config,
        }
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.config.base_url.trim_end_matches('/'))
    }

    /// Builds the authenticated history query for `run`.
    pub fn build_request(&self, run: &RunPath) -> RelayResult<HttpRequest> {
        if self.api_key.is_empty() {
            return Err(RelayError::Usage("API key must not be empty".to_string()));
        }
        if run.entity.is_empty() || run.project.is_empty() || run.run_id.is_empty() {
            return Err(RelayError::Usage(format!(
                "run path '{}' must name an entity, a project and a run",
                run
            )));
        }

        let payload = GraphQlRequest {
            query: RUN_FULL_HISTORY_QUERY,
            variables: RunHistoryVariables {
                entity: &run.entity,
                project: &run.project,
                name: &run.run_id,
                samples: self.config.samples,
            },
        };
        let body = serde_json::to_vec(&payload).map_err(RelayError::Serialization)?;

        Ok(HttpRequest::post(self.graphql_url(), body)
            .header("accept", "application/json")
            .header("Content-Type", "application/json")
            .basic_auth("api", self.api_key.as_str()))
    }

    /// Fetches the decoded history rows of `run`, oldest first.
    pub async fn fetch_history_rows(&self, run: &RunPath) -> RelayResult<Vec<Map<String, Value>>> {
        let request = self.build_request(run)?;
        let url = request.url.clone();

        if let Some(logger) = &self.config.logger {
            let request_json = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
            logger.log_request("run_history", &url, &request_json);
        }

        let response = self
            .transport
            .post(request)
            .await?
            .check_status(|status| (200..300).contains(&status))?;
        let status = response.status;
        let decoded: GraphQlResponse<RunHistoryData> = response.json()?;

        if let Some(errors) = decoded.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(RelayError::Remote(messages.join("; ")));
        }

        let project = decoded
            .data
            .and_then(|data| data.project)
            .ok_or_else(|| RelayError::NotFound(format!("project {}/{}", run.entity, run.project)))?;
        let history = project
            .run
            .ok_or_else(|| RelayError::NotFound(format!("run {}", run)))?
            .history
            .unwrap_or_default();

        tracing::debug!(run = %run, rows = history.len(), "fetched run history");

        if let Some(logger) = &self.config.logger {
            logger.log_response("run_history", &url, status, &Value::from(history.len()));
        }

        history.iter().map(String::as_str).map(decode_row).collect()
    }

    /// Fetches the history of `run` as a split-orientation table.
    pub async fn fetch_run_history(&self, run: &RunPath) -> RelayResult<SplitFrame> {
        let rows = self.fetch_history_rows(run).await?;
        Ok(SplitFrame::from_rows(&rows))
    }
}

fn decode_row(row: &str) -> RelayResult<Map<String, Value>> {
    serde_json::from_str(&normalize_non_finite(row)).map_err(|source| RelayError::Decode {
        body: row.as_bytes().to_vec(),
        source,
    })
}

/// Fetches one run's logged-metric history with the default configuration.
pub async fn fetch_run_history(
    entity: &str,
    project: &str,
    run_id: &str,
    api_key: &str,
) -> RelayResult<SplitFrame> {
    WandbClient::new(ReqwestTransport::new(), api_key)
        .fetch_run_history(&RunPath::new(entity, project, run_id))
        .await
}
