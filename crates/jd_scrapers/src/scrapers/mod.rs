use jd_core::{Error, Result, RetrievalResult};

use crate::catalog::JournalCatalog;
use crate::config::{FetchConfig, Selectors, SiteConfig};
use crate::extract::{ArticleExtractor, Extraction};
use crate::fetch::{HttpSource, PageFetcher, PageSource};
use crate::logging::Logger;

pub mod nature;

/// Retrieves current-issue articles for catalogued journals.
///
/// Only an unknown journal name is an error. Unreachable pages, pages with no
/// article cards and extraction failures are logged and yield an empty result.
pub struct JournalScraper<S> {
    catalog: JournalCatalog,
    site: SiteConfig,
    selectors: Selectors,
    fetcher: PageFetcher<S>,
    logger: Logger,
}

impl JournalScraper<HttpSource> {
    pub fn http(fetch: &FetchConfig) -> Result<Self> {
        Ok(Self::new(HttpSource::new(fetch)?))
    }
}

impl<S: PageSource> JournalScraper<S> {
    pub fn new(source: S) -> Self {
        Self {
            catalog: JournalCatalog::default(),
            site: SiteConfig::default(),
            selectors: Selectors::default(),
            fetcher: PageFetcher::new(source),
            logger: Logger::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: JournalCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.logger = self.logger.verbose(verbose);
        self
    }

    pub fn catalog(&self) -> &JournalCatalog {
        &self.catalog
    }

    pub async fn get_articles(&self, journal_name: &str) -> Result<RetrievalResult> {
        let entry = self
            .catalog
            .lookup(journal_name)
            .ok_or_else(|| Error::UnsupportedJournal(journal_name.to_string()))?;
        let logger = self.logger.clone().with_new_prefixes(format!("[{}]", entry.name));

        let url = match self.site.issue_url(entry.slug) {
            Ok(url) => url,
            Err(e) => {
                logger.error(&format!("Could not build issue URL: {}", e));
                return Ok(RetrievalResult::empty());
            }
        };
        logger.stage(&format!("🌐 Fetching {}", url));

        let document = match self.fetcher.fetch(&url).await {
            Ok(document) => document,
            Err(e) => {
                logger.warn(&format!("Page unreachable, returning no articles: {}", e));
                return Ok(RetrievalResult::empty());
            }
        };

        let extractor = match ArticleExtractor::new(&self.selectors) {
            Ok(extractor) => extractor,
            Err(e) => {
                logger.error(&format!("Extraction failed, returning no articles: {}", e));
                return Ok(RetrievalResult::empty());
            }
        };

        match extractor.extract(&document, entry.name) {
            Extraction::NoArticles => {
                logger.warn(&format!(
                    "No articles found with selector {:?}; the page layout may have changed",
                    self.selectors.article
                ));
                Ok(RetrievalResult::empty())
            }
            Extraction::Articles {
                records,
                cards,
                mismatch,
                duplicates,
            } => {
                if let Some(mismatch) = mismatch {
                    logger.warn(&mismatch.to_string());
                }
                if duplicates > 0 {
                    logger.debug(&format!("Dropped {} duplicate titles", duplicates));
                }
                logger.stage(&format!("📰 Found {} articles in {} cards", records.len(), cards));
                Ok(RetrievalResult::new(records))
            }
        }
    }

    /// Sequential retrieval for several journals, concatenated in argument order.
    /// Every name is resolved before the first request goes out.
    pub async fn get_articles_for(&self, journal_names: &[String]) -> Result<RetrievalResult> {
        if let Some(unknown) = journal_names
            .iter()
            .find(|name| self.catalog.lookup(name).is_none())
        {
            return Err(Error::UnsupportedJournal(unknown.clone()));
        }

        let mut combined = RetrievalResult::empty();
        for name in journal_names {
            combined.append(self.get_articles(name).await?);
        }
        Ok(combined)
    }
}

/// Retrieves one journal over HTTP with the default site layout.
pub async fn get_articles(
    journal_name: &str,
    selectors: Option<Selectors>,
    verbose: bool,
) -> Result<RetrievalResult> {
    JournalScraper::http(&FetchConfig::default())?
        .with_selectors(selectors.unwrap_or_default())
        .verbose(verbose)
        .get_articles(journal_name)
        .await
}

pub async fn get_articles_for(
    journal_names: &[String],
    selectors: Option<Selectors>,
    verbose: bool,
) -> Result<RetrievalResult> {
    JournalScraper::http(&FetchConfig::default())?
        .with_selectors(selectors.unwrap_or_default())
        .verbose(verbose)
        .get_articles_for(journal_names)
        .await
}
