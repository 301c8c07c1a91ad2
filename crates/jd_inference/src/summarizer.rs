use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use jd_core::{ArticleRecord, InferenceModel, RetrievalResult, SummaryRecord, SUMMARY_PLACEHOLDER};
use tokio::sync::Semaphore;
use tracing::{debug, error};

use crate::prompt::PromptTemplate;

/// Reported once per finished row.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    pub done: usize,
    pub total: usize,
    pub title: &'a str,
}

/// Runs every row of a retrieval result through the model.
pub struct Summarizer {
    model: Arc<dyn InferenceModel>,
    template: PromptTemplate,
    concurrency: usize,
}

impl Summarizer {
    pub fn new(model: Arc<dyn InferenceModel>, template: PromptTemplate) -> Self {
        Self {
            model,
            template,
            concurrency: 1,
        }
    }

    /// Requests in flight at once. 1 means strictly one after another.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// One summary per row, in input order regardless of completion order.
    /// A row whose request fails gets the placeholder summary.
    pub async fn summarize(
        &self,
        result: &RetrievalResult,
        progress: &dyn Fn(Progress<'_>),
    ) -> Vec<SummaryRecord> {
        let total = result.len();
        let done = AtomicUsize::new(0);
        let semaphore = Semaphore::new(self.concurrency);

        let rows = result.iter().map(|article| {
            let done = &done;
            let semaphore = &semaphore;
            async move {
                let _permit = semaphore.acquire().await.ok();
                let summary = self.summarize_one(article).await;
                let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                progress(Progress {
                    done: finished,
                    total,
                    title: &article.title,
                });
                SummaryRecord::from_article(article, summary)
            }
        });

        join_all(rows).await
    }

    async fn summarize_one(&self, article: &ArticleRecord) -> String {
        let prompt = self.template.render(article);
        debug!("🤖 {} prompt for '{}' ({} chars)", self.model.name(), article.title, prompt.len());
        match self.model.complete(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => {
                error!("Empty summary for '{}'", article.title);
                SUMMARY_PLACEHOLDER.to_string()
            }
            Err(e) => {
                error!("Failed to summarize '{}': {}", article.title, e);
                SUMMARY_PLACEHOLDER.to_string()
            }
        }
    }
}
