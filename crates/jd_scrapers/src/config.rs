use std::time::Duration;

use jd_core::{Error, Result};
use url::Url;

use crate::scrapers::nature;

/// Structural selectors locating article cards and their fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub article: String,
    pub title: String,
    pub url: String,
    pub abstract_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            article: nature::ARTICLE_SELECTOR.to_string(),
            title: nature::TITLE_SELECTOR.to_string(),
            url: nature::URL_SELECTOR.to_string(),
            abstract_text: nature::ABSTRACT_SELECTOR.to_string(),
        }
    }
}

/// Where journal issue pages live.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: Url,
}

impl SiteConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self { base_url })
    }

    /// `<base>/<slug>/current-issue`
    pub fn issue_url(&self, slug: &str) -> Result<Url> {
        let path = format!("{}/current-issue", slug);
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(&path)
            .map_err(|e| Error::InvalidUrl(format!("{}{}: {}", base, path, e)))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: nature::base_url(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("journal-digest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}
