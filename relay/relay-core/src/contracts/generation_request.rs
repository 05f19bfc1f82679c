use serde::{Deserialize, Serialize};

use crate::contracts::GenerationParameters;
use crate::error::{RelayError, RelayResult};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, parameters: GenerationParameters) -> Self {
        Self {
            inputs: prompt.into(),
            parameters,
        }
    }

    /// Encodes the request as the JSON bytes posted to the endpoint.
    pub fn to_body(&self) -> RelayResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(RelayError::Serialization)
    }
}
