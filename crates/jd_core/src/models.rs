use std::fmt;

use async_trait::async_trait;

use crate::Result;

/// A text-completion service used to summarize articles.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Sends a fully rendered prompt and returns the completion text
    async fn complete(&self, prompt: &str) -> Result<String>;
}
