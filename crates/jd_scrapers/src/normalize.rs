//! Cleanup applied between raw extraction and the final record set.

use std::collections::HashSet;
use std::fmt;

use jd_core::{ArticleRecord, ABSTRACT_PLACEHOLDER};

use crate::extract::RawArticle;

/// Trims and collapses every whitespace run (newlines included) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapsed abstract text, or the placeholder when missing or blank.
pub fn normalize_abstract(text: Option<&str>) -> String {
    let collapsed = text.map(collapse_whitespace).unwrap_or_default();
    if collapsed.is_empty() {
        ABSTRACT_PLACEHOLDER.to_string()
    } else {
        collapsed
    }
}

/// The three per-field lists built from independent selection passes.
///
/// A card without a title or link contributes nothing to that list, so the
/// lists can end up with different lengths. Abstracts always get an entry
/// because a missing one becomes the placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldColumns {
    pub titles: Vec<String>,
    pub urls: Vec<String>,
    pub abstracts: Vec<String>,
}

impl FieldColumns {
    pub fn from_raw(raw: &[RawArticle]) -> Self {
        Self {
            titles: raw.iter().filter_map(|a| a.title.clone()).collect(),
            urls: raw.iter().filter_map(|a| a.url.clone()).collect(),
            abstracts: raw
                .iter()
                .map(|a| normalize_abstract(a.abstract_text.as_deref()))
                .collect(),
        }
    }

    pub fn min_len(&self) -> usize {
        self.titles.len().min(self.urls.len()).min(self.abstracts.len())
    }

    pub fn is_aligned(&self) -> bool {
        self.titles.len() == self.urls.len() && self.urls.len() == self.abstracts.len()
    }
}

/// Original list lengths and the length everything was cut down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub titles: usize,
    pub urls: usize,
    pub abstracts: usize,
    pub target: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field lengths differ (titles: {}, urls: {}, abstracts: {}); truncating to {}",
            self.titles, self.urls, self.abstracts, self.target
        )
    }
}

/// Truncates all lists to the shortest one, keeping document order.
///
/// This pairs fields by position only. When a card lost a field the pairing
/// after that point can be off by one; that is the documented behavior.
pub fn reconcile(mut columns: FieldColumns) -> (FieldColumns, Option<LengthMismatch>) {
    if columns.is_aligned() {
        return (columns, None);
    }

    let target = columns.min_len();
    let mismatch = LengthMismatch {
        titles: columns.titles.len(),
        urls: columns.urls.len(),
        abstracts: columns.abstracts.len(),
        target,
    };
    columns.titles.truncate(target);
    columns.urls.truncate(target);
    columns.abstracts.truncate(target);
    (columns, Some(mismatch))
}

/// Zips aligned columns into records tagged with `source`.
pub fn assemble(columns: FieldColumns, source: &str) -> Vec<ArticleRecord> {
    columns
        .titles
        .into_iter()
        .zip(columns.urls)
        .zip(columns.abstracts)
        .map(|((title, url), abstract_text)| ArticleRecord {
            title,
            url,
            abstract_text,
            source: source.to_string(),
        })
        .collect()
}

/// Drops records whose title was already seen. First occurrence wins.
pub fn dedup_by_title(records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.title.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}{}", prefix, i)).collect()
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\t\tc  "), "a b c");
        assert_eq!(collapse_whitespace("single"), "single");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_normalize_abstract_placeholder() {
        assert_eq!(normalize_abstract(None), ABSTRACT_PLACEHOLDER);
        assert_eq!(normalize_abstract(Some("   \n  ")), ABSTRACT_PLACEHOLDER);
        assert_eq!(normalize_abstract(Some(" We  show\nthat ")), "We show that");
    }

    #[test]
    fn test_reconcile_truncates_to_minimum() {
        let columns = FieldColumns {
            titles: strings("t", 5),
            urls: strings("u", 5),
            abstracts: strings("a", 3),
        };
        let (columns, mismatch) = reconcile(columns);
        let mismatch = mismatch.unwrap();

        assert_eq!(columns.titles, strings("t", 3));
        assert_eq!(columns.urls, strings("u", 3));
        assert_eq!(columns.abstracts, strings("a", 3));
        assert_eq!(
            mismatch,
            LengthMismatch { titles: 5, urls: 5, abstracts: 3, target: 3 }
        );
        assert_eq!(
            mismatch.to_string(),
            "field lengths differ (titles: 5, urls: 5, abstracts: 3); truncating to 3"
        );
        assert_eq!(assemble(columns, "Nature").len(), 3);
    }

    #[test]
    fn test_reconcile_aligned_is_untouched() {
        let columns = FieldColumns {
            titles: strings("t", 2),
            urls: strings("u", 2),
            abstracts: strings("a", 2),
        };
        let (out, mismatch) = reconcile(columns.clone());
        assert!(mismatch.is_none());
        assert_eq!(out, columns);
    }

    #[test]
    fn test_from_raw_skips_missing_titles_and_urls() {
        let raw = vec![
            RawArticle {
                title: Some("One".into()),
                url: Some("https://x/1".into()),
                abstract_text: None,
            },
            RawArticle {
                title: None,
                url: Some("https://x/2".into()),
                abstract_text: Some("Two\n  abstract".into()),
            },
        ];
        let columns = FieldColumns::from_raw(&raw);
        assert_eq!(columns.titles, vec!["One"]);
        assert_eq!(columns.urls.len(), 2);
        assert_eq!(columns.abstracts, vec![ABSTRACT_PLACEHOLDER, "Two abstract"]);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let columns = FieldColumns {
            titles: vec!["A".into(), "B".into(), "A".into()],
            urls: vec!["u1".into(), "u2".into(), "u3".into()],
            abstracts: vec!["x".into(), "y".into(), "z".into()],
        };
        let records = dedup_by_title(assemble(columns, "Nature"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "A");
        assert_eq!(records[0].url, "u1");
        assert_eq!(records[1].title, "B");
        assert!(records.iter().all(|r| r.source == "Nature"));
    }
}
