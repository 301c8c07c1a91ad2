use jd_core::RetrievalResult;

/// Narrows a retrieval result before it is sent to the model.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    /// Any keyword matching title or abstract keeps the record. Empty keeps all.
    pub keywords: Vec<String>,
    pub limit: Option<usize>,
}

impl ArticleFilter {
    pub fn new(keywords: Vec<String>, limit: Option<usize>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords, limit }
    }

    pub fn apply(&self, result: RetrievalResult) -> RetrievalResult {
        let limit = self.limit.unwrap_or(usize::MAX);
        let records = result
            .into_records()
            .into_iter()
            .filter(|record| {
                if self.keywords.is_empty() {
                    return true;
                }
                let title = record.title.to_lowercase();
                let abstract_text = record.abstract_text.to_lowercase();
                self.keywords
                    .iter()
                    .any(|k| title.contains(k.as_str()) || abstract_text.contains(k.as_str()))
            })
            .take(limit)
            .collect();
        RetrievalResult::new(records)
    }
}
