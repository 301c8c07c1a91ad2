use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ABSTRACT_PLACEHOLDER: &str = "Abstract not available";
pub const SUMMARY_PLACEHOLDER: &str = "Summary not available";

/// A journal and the path segment the publisher routes it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub name: &'static str,
    pub slug: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub source: String,
}

/// Marks where a result set came from so downstream stages can check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    JournalResult,
}

/// Ordered, deduplicated articles from one or more retrievals.
///
/// An empty result is how every recoverable failure is reported; it still
/// carries the provenance marker and the column layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalResult {
    kind: Provenance,
    records: Vec<ArticleRecord>,
}

impl RetrievalResult {
    pub const COLUMNS: [&'static str; 4] = ["title", "url", "abstract", "source"];

    pub fn new(records: Vec<ArticleRecord>) -> Self {
        Self {
            kind: Provenance::JournalResult,
            records,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn kind(&self) -> Provenance {
        self.kind
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ArticleRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleRecord> {
        self.records.iter()
    }

    /// Appends another result's rows after this one's.
    pub fn append(&mut self, other: RetrievalResult) {
        self.records.extend(other.records);
    }

    /// Distinct `source` values in first-seen order.
    pub fn sources(&self) -> Vec<&str> {
        distinct_sources(self.records.iter().map(|r| r.source.as_str()))
    }
}

impl Default for RetrievalResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a RetrievalResult {
    type Item = &'a ArticleRecord;
    type IntoIter = std::slice::Iter<'a, ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// An article plus the model's summary of it. Flat so it serializes to one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub source: String,
    pub summary: String,
}

impl SummaryRecord {
    pub fn from_article(article: &ArticleRecord, summary: impl Into<String>) -> Self {
        Self {
            title: article.title.clone(),
            url: article.url.clone(),
            abstract_text: article.abstract_text.clone(),
            source: article.source.clone(),
            summary: summary.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    pub label: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<SummaryRecord>,
}

impl Digest {
    pub fn new(rows: Vec<SummaryRecord>) -> Self {
        let label = Self::label_for(&distinct_sources(rows.iter().map(|r| r.source.as_str())));
        Self {
            label,
            generated_at: Utc::now(),
            rows,
        }
    }

    /// Human label naming the journals a digest covers.
    pub fn label_for(sources: &[&str]) -> String {
        if sources.is_empty() {
            "No journals".to_string()
        } else {
            sources.join(", ")
        }
    }
}

fn distinct_sources<'a>(sources: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for source in sources {
        if !seen.contains(&source) {
            seen.push(source);
        }
    }
    seen
}
