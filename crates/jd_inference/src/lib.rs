pub mod models;
pub mod prompt;
pub mod summarizer;

pub const DEFAULT_MODEL_URL: &str = "http://localhost:11434/llama3.2";

/// Where the completion server lives. The model name may ride in the URL
/// path (`http://host:port/model`) or be given separately.
#[derive(Debug, Clone, Default)]
pub struct InferenceConfig {
    pub model_url: Option<String>,
    pub model_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend name: `ollama` or `echo`
    pub backend: String,
    pub inference_config: InferenceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "ollama".to_string(),
            inference_config: InferenceConfig::default(),
        }
    }
}

/// Builds a model-specific config from the shared one.
pub trait ModelConfig: Sized {
    fn from_inference_config(config: &InferenceConfig) -> jd_core::Result<Self>;
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::prompt::PromptTemplate;
    pub use super::summarizer::{Progress, Summarizer};
    pub use super::{Config, InferenceConfig};
    pub use jd_core::{Error, InferenceModel, Result};
}

pub use models::create_model;
pub use prompt::PromptTemplate;
pub use summarizer::{Progress, Summarizer};
