use std::fmt;

use jd_core::{InferenceModel, Result};

/// Offline stand-in: answers with the opening words of the prompt's abstract.
pub struct EchoModel {
    words: usize,
}

impl EchoModel {
    pub fn new(words: usize) -> Self {
        Self { words }
    }
}

impl Default for EchoModel {
    fn default() -> Self {
        Self::new(20)
    }
}

impl fmt::Debug for EchoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoModel").field("words", &self.words).finish()
    }
}

#[async_trait::async_trait]
impl InferenceModel for EchoModel {
    fn name(&self) -> &str {
        "Echo"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = prompt
            .rsplit_once("Abstract:")
            .map(|(_, body)| body)
            .unwrap_or(prompt);
        let body = body.split("Summary:").next().unwrap_or(body);
        let words: Vec<&str> = body.split_whitespace().take(self.words).collect();
        Ok(words.join(" "))
    }
}
