use jd_core::{ArticleRecord, Error, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::Selectors;
use crate::fetch::Document;
use crate::normalize::{self, FieldColumns, LengthMismatch};

/// Fields pulled from one article card. `None` marks a field the card lacked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub abstract_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The card selector matched nothing on the page.
    NoArticles,
    Articles {
        records: Vec<ArticleRecord>,
        cards: usize,
        mismatch: Option<LengthMismatch>,
        duplicates: usize,
    },
}

impl Extraction {
    pub fn into_records(self) -> Vec<ArticleRecord> {
        match self {
            Extraction::NoArticles => Vec::new(),
            Extraction::Articles { records, .. } => records,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    article: Selector,
    title: Selector,
    url: Selector,
    abstract_text: Selector,
}

fn parse_selector(kind: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Selector(format!("{} selector {:?}: {}", kind, selector, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

impl ArticleExtractor {
    pub fn new(selectors: &Selectors) -> Result<Self> {
        Ok(Self {
            article: parse_selector("article", &selectors.article)?,
            title: parse_selector("title", &selectors.title)?,
            url: parse_selector("url", &selectors.url)?,
            abstract_text: parse_selector("abstract", &selectors.abstract_text)?,
        })
    }

    /// One [`RawArticle`] per card, in document order.
    pub fn cards(&self, html: &Html, base_url: &Url) -> Vec<RawArticle> {
        html.select(&self.article)
            .map(|card| self.card(card, base_url))
            .collect()
    }

    fn card(&self, card: ElementRef<'_>, base_url: &Url) -> RawArticle {
        let title = card
            .select(&self.title)
            .next()
            .map(element_text)
            .filter(|title| !title.is_empty());

        let url = card
            .select(&self.url)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| base_url.join(href.trim()).ok())
            .map(String::from);

        let abstract_text = card.select(&self.abstract_text).next().map(element_text);

        RawArticle {
            title,
            url,
            abstract_text,
        }
    }

    /// Cards to records: normalize, reconcile field counts, attach `source`, dedup by title.
    pub fn extract(&self, document: &Document, source: &str) -> Extraction {
        let raw = self.cards(document.html(), document.base_url());
        if raw.is_empty() {
            return Extraction::NoArticles;
        }

        let (columns, mismatch) = normalize::reconcile(FieldColumns::from_raw(&raw));
        let assembled = normalize::assemble(columns, source);
        let before = assembled.len();
        let records = normalize::dedup_by_title(assembled);

        Extraction::Articles {
            duplicates: before - records.len(),
            cards: raw.len(),
            records,
            mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_core::ABSTRACT_PLACEHOLDER;

    const BASE: &str = "https://www.nature.com/nm/current-issue";

    fn card(title: &str, href: &str, summary: Option<&str>) -> String {
        let summary = summary
            .map(|s| format!(r#"<div class="c-card__summary"><p>{}</p></div>"#, s))
            .unwrap_or_default();
        format!(
            r#"<article class="c-card"><h3 class="c-card__title"><a href="{}">{}</a></h3>{}</article>"#,
            href, title, summary
        )
    }

    fn document(cards: &[String]) -> Document {
        let markup = format!("<html><body><ul>{}</ul></body></html>", cards.concat());
        Document::parse(Url::parse(BASE).unwrap(), &markup)
    }

    fn extractor() -> ArticleExtractor {
        ArticleExtractor::new(&Selectors::default()).unwrap()
    }

    #[test]
    fn test_cards_resolve_relative_links() {
        let doc = document(&[
            card("Relative", "/articles/s41591-024-0001", Some("a")),
            card("Absolute", "https://doi.org/10.1038/x", Some("b")),
        ]);
        let raw = extractor().cards(doc.html(), doc.base_url());
        assert_eq!(raw[0].url.as_deref(), Some("https://www.nature.com/articles/s41591-024-0001"));
        assert_eq!(raw[1].url.as_deref(), Some("https://doi.org/10.1038/x"));
    }

    #[test]
    fn test_card_fields_are_trimmed() {
        let doc = document(&[card("\n   Spaced title  \n", "/a", Some("  body  "))]);
        let raw = extractor().cards(doc.html(), doc.base_url());
        assert_eq!(raw[0].title.as_deref(), Some("Spaced title"));
        assert_eq!(raw[0].abstract_text.as_deref(), Some("body"));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let markup = r#"<article><p>nothing useful</p></article>"#;
        let doc = Document::parse(Url::parse(BASE).unwrap(), markup);
        let raw = extractor().cards(doc.html(), doc.base_url());
        assert_eq!(raw, vec![RawArticle::default()]);
    }

    #[test]
    fn test_extract_well_formed() {
        let doc = document(&[
            card("First", "/articles/1", Some("Line one\n\n   line   two")),
            card("Second", "/articles/2", Some("Short")),
        ]);
        match extractor().extract(&doc, "Nature Medicine") {
            Extraction::Articles { records, cards, mismatch, duplicates } => {
                assert_eq!(cards, 2);
                assert!(mismatch.is_none());
                assert_eq!(duplicates, 0);
                assert_eq!(records[0].abstract_text, "Line one line two");
                assert!(records.iter().all(|r| r.source == "Nature Medicine"));
                assert!(records.iter().all(|r| r.url.starts_with("https://")));
            }
            Extraction::NoArticles => panic!("expected articles"),
        }
    }

    #[test]
    fn test_extract_no_cards() {
        let doc = Document::parse(Url::parse(BASE).unwrap(), "<html><body><p>maintenance</p></body></html>");
        assert_eq!(extractor().extract(&doc, "Nature"), Extraction::NoArticles);
    }

    #[test]
    fn test_extract_missing_abstract_uses_placeholder() {
        let doc = document(&[card("Only", "/articles/1", None)]);
        let records = extractor().extract(&doc, "Nature").into_records();
        assert_eq!(records[0].abstract_text, ABSTRACT_PLACEHOLDER);
    }

    #[test]
    fn test_extract_duplicate_titles() {
        let doc = document(&[
            card("Same", "/articles/1", Some("first")),
            card("Same", "/articles/2", Some("second")),
        ]);
        match extractor().extract(&doc, "Nature") {
            Extraction::Articles { records, duplicates, .. } => {
                assert_eq!(duplicates, 1);
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].abstract_text, "first");
            }
            Extraction::NoArticles => panic!("expected articles"),
        }
    }

    #[test]
    fn test_extract_missing_title_truncates() {
        let doc = document(&[
            card("One", "/articles/1", Some("a")),
            card("", "/articles/2", Some("b")),
            card("Three", "/articles/3", Some("c")),
        ]);
        match extractor().extract(&doc, "Nature") {
            Extraction::Articles { records, mismatch, .. } => {
                let mismatch = mismatch.unwrap();
                assert_eq!((mismatch.titles, mismatch.urls, mismatch.abstracts), (2, 3, 3));
                assert_eq!(mismatch.target, 2);
                assert_eq!(records.len(), 2);
                // positional pairing: "Three" is matched with the second card's link
                assert_eq!(records[1].title, "Three");
                assert_eq!(records[1].url, "https://www.nature.com/articles/2");
            }
            Extraction::NoArticles => panic!("expected articles"),
        }
    }

    #[test]
    fn test_invalid_selector() {
        let selectors = Selectors {
            article: "article[".to_string(),
            ..Selectors::default()
        };
        assert!(matches!(ArticleExtractor::new(&selectors), Err(Error::Selector(_))));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let doc = document(&[card("A", "/1", Some("x")), card("B", "/2", None)]);
        let ex = extractor();
        assert_eq!(ex.extract(&doc, "Nature"), ex.extract(&doc, "Nature"));
    }
}
