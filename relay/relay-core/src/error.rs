//! Error taxonomy shared by every relay client.
//!
//! Nothing here is recovered inside the libraries. The command-line entry
//! points turn each variant into a diagnostic and a non-zero exit status.

use thiserror::Error;

pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Bad or missing arguments, detected before any network activity.
    #[error("usage: {0}")]
    Usage(String),

    /// The remote answered with a status other than the one expected.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The remote answered successfully but the body is not valid JSON.
    #[error("response body is not valid JSON ({source}): {}", String::from_utf8_lossy(.body))]
    Decode {
        body: Vec<u8>,
        #[source]
        source: serde_json::Error,
    },

    /// Connection refused, DNS failure, timeout and the like.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("not found: {0}")]
    NotFound(String),

    /// The remote reported an error inside an otherwise successful response.
    #[error("remote error: {0}")]
    Remote(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to encode request: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl RelayError {
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RelayError::Transport(err.into())
    }
}
