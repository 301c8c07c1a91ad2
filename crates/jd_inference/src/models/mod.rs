use std::sync::Arc;

use jd_core::{Error, InferenceModel, Result};

use crate::{Config, ModelConfig};

pub mod echo;
pub mod ollama;

pub use echo::EchoModel;
pub use ollama::{OllamaModel, OllamaModelConfig};

/// Builds the model named by `config.backend`.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_default();
    match config.backend.to_lowercase().as_str() {
        "ollama" => {
            let model_config = OllamaModelConfig::from_inference_config(&config.inference_config)?;
            Ok(Arc::new(OllamaModel::connect(model_config).await?))
        }
        "echo" => Ok(Arc::new(EchoModel::default())),
        other => Err(Error::Inference(format!(
            "Unknown model backend '{}'. Available models: ollama (default), echo",
            other
        ))),
    }
}
