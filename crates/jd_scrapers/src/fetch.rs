//! Retrieval of issue pages.
//!
//! [`PageSource`] is the transport seam: [`HttpSource`] talks to the network,
//! tests plug in static pages. [`PageFetcher`] turns whatever the source
//! returns into a parsed [`Document`] and folds every failure into
//! [`Error::PageUnreachable`].

use std::collections::HashMap;

use async_trait::async_trait;
use jd_core::{Error, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::config::FetchConfig;

/// Raw page body plus the URL it was finally served from.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage>;
}

/// Plain GET over reqwest. One request per call, no retries.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?;

        let url = response.url().clone();
        let body = response.text().await?;
        Ok(FetchedPage { url, body })
    }
}

/// In-memory pages keyed by URL. Unknown URLs are unreachable.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        self.pages
            .get(url.as_str())
            .map(|body| FetchedPage {
                url: url.clone(),
                body: body.clone(),
            })
            .ok_or_else(|| Error::PageUnreachable(format!("no page stored for {}", url)))
    }
}

/// A parsed page and the URL relative links resolve against.
#[derive(Debug)]
pub struct Document {
    base_url: Url,
    html: Html,
}

impl Document {
    pub fn parse(base_url: Url, markup: &str) -> Self {
        Self {
            base_url,
            html: Html::parse_document(markup),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

pub struct PageFetcher<S> {
    source: S,
}

impl<S: PageSource> PageFetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches and parses `url`. Any failure comes back as `PageUnreachable`.
    pub async fn fetch(&self, url: &Url) -> Result<Document> {
        let page = match self.source.fetch_page(url).await {
            Ok(page) => page,
            Err(Error::PageUnreachable(reason)) => return Err(Error::PageUnreachable(reason)),
            Err(e) => return Err(Error::PageUnreachable(format!("{}: {}", url, e))),
        };
        Ok(Document::parse(page.url, &page.body))
    }
}
