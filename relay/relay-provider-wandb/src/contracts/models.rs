use serde::{Deserialize, Serialize};

/// Full (sampled) history of one run. `history` comes back as a list of
/// JSON-encoded row objects.
pub const RUN_FULL_HISTORY_QUERY: &str = r#"query RunFullHistory($project: String!, $entity: String!, $name: String!, $samples: Int) {
    project(name: $project, entityName: $entity) {
        run(name: $name) {
            history(samples: $samples)
        }
    }
}"#;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RunHistoryVariables<'a> {
    pub entity: &'a str,
    pub project: &'a str,
    pub name: &'a str,
    pub samples: u32,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RunHistoryData {
    pub project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectNode {
    pub run: Option<RunNode>,
}

#[derive(Debug, Deserialize)]
pub struct RunNode {
    pub history: Option<Vec<String>>,
}
