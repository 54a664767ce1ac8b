//! OpenAI-compatible completion service configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_grading_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_flashcard_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API key. Also read from `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for grade suggestions.
    #[serde(default = "default_grading_model")]
    pub grading_model: String,

    /// Model used for flashcard generation.
    #[serde(default = "default_flashcard_model")]
    pub flashcard_model: String,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            grading_model: default_grading_model(),
            flashcard_model: default_flashcard_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OpenAiConfig {
    /// Check if an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }
}
