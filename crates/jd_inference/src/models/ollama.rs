use std::fmt;

use jd_core::{Error, InferenceModel, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{InferenceConfig, ModelConfig, DEFAULT_MODEL_URL};

const DEFAULT_MODEL_NAME: &str = "llama3.2";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<LocalModel>,
}

#[derive(Deserialize)]
struct LocalModel {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaModelConfig {
    base_url: Url,
    model_name: String,
}

impl ModelConfig for OllamaModelConfig {
    fn from_inference_config(config: &InferenceConfig) -> Result<Self> {
        let raw = config.model_url.as_deref().unwrap_or(DEFAULT_MODEL_URL);
        let parsed = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{}: {}", raw, e)))?;

        let path_model = parsed.path().trim_matches('/').to_string();
        let model_name = config
            .model_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| {
                if path_model.is_empty() {
                    DEFAULT_MODEL_NAME.to_string()
                } else {
                    path_model
                }
            });

        let mut base_url = parsed;
        base_url.set_path("/");
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(Self { base_url, model_name })
    }
}

impl OllamaModelConfig {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }
}

/// Text completion against a local Ollama server's `/api/generate`.
pub struct OllamaModel {
    client: Client,
    config: OllamaModelConfig,
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.config.base_url.as_str())
            .field("model_name", &self.config.model_name)
            .finish()
    }
}

impl OllamaModel {
    pub fn new(config: OllamaModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Builds the model and checks the server answers before any prompt is sent.
    pub async fn connect(config: OllamaModelConfig) -> Result<Self> {
        let model = Self::new(config);
        let tags = model.local_models().await.map_err(|e| {
            Error::Inference(format!(
                "Ollama is not available at {}: {}. Please ensure Ollama is running and the model '{}' is installed.",
                model.config.base_url, e, model.config.model_name
            ))
        })?;

        let wanted = &model.config.model_name;
        let installed = tags
            .iter()
            .any(|name| name == wanted || name.strip_suffix(":latest") == Some(wanted.as_str()));
        if !installed {
            tracing::warn!(
                "Model '{}' is not listed by Ollama at {}; requests may fail",
                wanted,
                model.config.base_url
            );
        }
        Ok(model)
    }

    async fn local_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.config.endpoint("api/tags")?)
            .send()
            .await?
            .error_for_status()?
            .json::<TagsResponse>()
            .await?;
        Ok(response.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait::async_trait]
impl InferenceModel for OllamaModel {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.config.model_name,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.config.endpoint("api/generate")?)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateResponse>()
            .await?;

        Ok(response.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>, name: Option<&str>) -> Result<OllamaModelConfig> {
        OllamaModelConfig::from_inference_config(&InferenceConfig {
            model_url: url.map(String::from),
            model_name: name.map(String::from),
        })
    }

    #[test]
    fn test_default_config() {
        let config = config(None, None).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:11434/");
        assert_eq!(config.model_name(), "llama3.2");
    }

    #[test]
    fn test_model_from_url_path() {
        let config = config(Some("http://gpu-box:8080/gemma3:12b"), None).unwrap();
        assert_eq!(config.base_url().as_str(), "http://gpu-box:8080/");
        assert_eq!(config.model_name(), "gemma3:12b");
    }

    #[test]
    fn test_explicit_name_wins() {
        let explicit = config(Some("http://localhost:11434/gemma3:12b"), Some("mistral")).unwrap();
        assert_eq!(explicit.model_name(), "mistral");

        let bare = config(Some("http://localhost:11434"), None).unwrap();
        assert_eq!(bare.model_name(), "llama3.2");
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(config(Some("localhost"), None), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_generate_request_shape() {
        let body = serde_json::to_value(GenerateRequest {
            model: "llama3.2",
            prompt: "hi",
            stream: false,
        })
        .unwrap();
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["stream"], false);
    }

    #[tokio::test]
    async fn test_complete_against_closed_port() {
        let model = OllamaModel::new(config(Some("http://127.0.0.1:9/llama3.2"), None).unwrap());
        assert!(matches!(model.complete("hello").await, Err(Error::Http(_))));
    }
}
