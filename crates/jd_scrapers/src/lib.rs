pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod scrapers;

pub use catalog::JournalCatalog;
pub use cli::{handle_command, ScraperArgs, ScraperCommands, SelectorArgs};
pub use config::{FetchConfig, Selectors, SiteConfig};
pub use extract::{ArticleExtractor, Extraction, RawArticle};
pub use fetch::{Document, FetchedPage, HttpSource, PageFetcher, PageSource, StaticSource};
pub use filter::ArticleFilter;
pub use scrapers::{get_articles, get_articles_for, JournalScraper};

pub mod prelude {
    pub use super::scrapers::JournalScraper;
    pub use super::config::Selectors;
    pub use jd_core::{ArticleRecord, Error, Result, RetrievalResult};
}
