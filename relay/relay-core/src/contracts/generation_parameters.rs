use serde::{Deserialize, Serialize};

/// Text-generation controls sent with every inference request.
///
/// `Default` is the parameter set the `inference` command ships with. Any
/// field missing from a deserialized override keeps its default value.
/// `seed` and `truncate` are always serialized, as `null` when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationParameters {
    pub best_of: u32,
    pub decoder_input_details: bool,
    pub details: bool,
    pub do_sample: bool,
    pub max_new_tokens: u32,
    pub repetition_penalty: f64,
    pub return_full_text: bool,
    pub seed: Option<u64>,
    pub stop: Vec<String>,
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    /// `None` lets the endpoint keep the whole prompt.
    pub truncate: Option<u32>,
    pub typical_p: f64,
    pub watermark: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            best_of: 1,
            decoder_input_details: true,
            details: true,
            do_sample: true,
            max_new_tokens: 512,
            repetition_penalty: 1.03,
            return_full_text: false,
            seed: None,
            stop: vec!["photographer".to_string()],
            temperature: 0.5,
            top_k: 10,
            top_p: 0.95,
            truncate: None,
            typical_p: 0.95,
            watermark: true,
        }
    }
}
